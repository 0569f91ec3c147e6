use chrono::Duration;
use serde::Deserialize;
use thiserror::Error;

use crate::derived::{EpochTimeIndex, GeodeticProjector, FRAME_ALIGNMENT_OFFSET_DEG};

/// Largest accepted `clock_skew` in either direction.
pub const MAX_CLOCK_SKEW: Duration = Duration::days(1);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid clock_skew {value:?}: {message}")]
    Duration { value: String, message: String },
    #[error("longitude_offset_deg must be finite, got {0}")]
    LongitudeOffset(f64),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Added to the caller's clock before matching feed epochs, e.g. `6h` or
    /// `-30s`.
    #[serde(default = "default_clock_skew")]
    pub clock_skew: String,
    #[serde(default = "default_longitude_offset")]
    pub longitude_offset_deg: f64,
}

fn default_clock_skew() -> String {
    "0s".to_string()
}

fn default_longitude_offset() -> f64 {
    FRAME_ALIGNMENT_OFFSET_DEG
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clock_skew: default_clock_skew(),
            longitude_offset_deg: default_longitude_offset(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        config.clock_skew()?;
        if !config.longitude_offset_deg.is_finite() {
            return Err(ConfigError::LongitudeOffset(config.longitude_offset_deg));
        }
        Ok(config)
    }

    pub fn clock_skew(&self) -> Result<Duration, ConfigError> {
        parse_signed_duration(&self.clock_skew)
            .and_then(|skew| {
                if skew.abs() > MAX_CLOCK_SKEW {
                    Err(format!("exceeds {}", MAX_CLOCK_SKEW))
                } else {
                    Ok(skew)
                }
            })
            .map_err(|message| ConfigError::Duration {
                value: self.clock_skew.clone(),
                message,
            })
    }

    pub fn time_index(&self) -> Result<EpochTimeIndex, ConfigError> {
        Ok(EpochTimeIndex::with_skew(self.clock_skew()?))
    }

    pub fn projector(&self) -> GeodeticProjector {
        GeodeticProjector::with_offset(self.longitude_offset_deg)
    }
}

fn parse_signed_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    let (neg, rest) = match s.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let dur = humantime::parse_duration(rest.trim())
        .map_err(|e| e.to_string())
        .and_then(|d| Duration::from_std(d).map_err(|e| e.to_string()))?;
    Ok(if neg { -dur } else { dur })
}
