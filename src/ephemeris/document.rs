use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use super::epoch::Epoch;
use super::error::EphemerisError;
use super::state_vector::RawStateVector;
use super::trajectory::{Coverage, Trajectory};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("ephemeris error: {0}")]
    Ephemeris(#[from] EphemerisError),
}

/// A state-vector document already extracted from the feed, as YAML or JSON.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedDocument {
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub stop_time: Option<String>,
    #[serde(default)]
    pub header: BTreeMap<String, String>,
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    pub state_vectors: Vec<RawStateVector>,
}

impl FeedDocument {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> Result<Self, DocumentError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn coverage(&self) -> Result<Option<Coverage>, EphemerisError> {
        match (&self.start_time, &self.stop_time) {
            (Some(start), Some(stop)) => Ok(Some(Coverage {
                start: Epoch::parse(start.trim())?,
                stop: Epoch::parse(stop.trim())?,
            })),
            _ => Ok(None),
        }
    }

    pub fn to_trajectory(&self) -> Result<Trajectory, EphemerisError> {
        let trajectory = Trajectory::from_raw(&self.state_vectors)?;
        Ok(match self.coverage()? {
            Some(coverage) => trajectory.with_coverage(coverage),
            None => trajectory,
        })
    }
}
