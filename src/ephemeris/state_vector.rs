use serde::{Deserialize, Serialize};

use super::epoch::Epoch;
use super::error::EphemerisError;

/// Position in the Earth-centered inertial frame, km.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Distance from Earth's center, km.
    pub fn radius_km(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Velocity in the Earth-centered inertial frame, km/s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Velocity {
    pub x_dot: f64,
    pub y_dot: f64,
    pub z_dot: f64,
}

impl Velocity {
    pub fn new(x_dot: f64, y_dot: f64, z_dot: f64) -> Self {
        Self {
            x_dot,
            y_dot,
            z_dot,
        }
    }
}

/// One ephemeris sample.
///
/// All six components are finite: `StateVector` is only built from numbers
/// that went through [`parse_component`] or from values the caller already
/// holds as `f64`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateVector {
    pub epoch: Epoch,
    pub position: Position,
    pub velocity: Velocity,
}

impl StateVector {
    pub fn new(epoch: Epoch, position: Position, velocity: Velocity) -> Self {
        Self {
            epoch,
            position,
            velocity,
        }
    }
}

/// A numeric field as it arrives from the feed: either already a number or
/// still text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawComponent {
    Number(f64),
    Text(String),
}

impl RawComponent {
    pub fn resolve(&self, field: &'static str) -> Result<f64, EphemerisError> {
        match self {
            RawComponent::Number(v) if v.is_finite() => Ok(*v),
            RawComponent::Number(v) => Err(EphemerisError::Parse {
                field,
                value: v.to_string(),
            }),
            RawComponent::Text(s) => parse_component(field, s),
        }
    }
}

/// A state vector record before any text has been converted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawStateVector {
    pub epoch: String,
    pub x: RawComponent,
    pub y: RawComponent,
    pub z: RawComponent,
    pub x_dot: RawComponent,
    pub y_dot: RawComponent,
    pub z_dot: RawComponent,
}

impl TryFrom<&RawStateVector> for StateVector {
    type Error = EphemerisError;

    fn try_from(raw: &RawStateVector) -> Result<Self, Self::Error> {
        Ok(StateVector {
            epoch: Epoch::parse(raw.epoch.trim())?,
            position: Position {
                x: raw.x.resolve("x")?,
                y: raw.y.resolve("y")?,
                z: raw.z.resolve("z")?,
            },
            velocity: Velocity {
                x_dot: raw.x_dot.resolve("x_dot")?,
                y_dot: raw.y_dot.resolve("y_dot")?,
                z_dot: raw.z_dot.resolve("z_dot")?,
            },
        })
    }
}

/// Converts one textual feed component into a finite number.
pub fn parse_component(field: &'static str, text: &str) -> Result<f64, EphemerisError> {
    let err = || EphemerisError::Parse {
        field,
        value: text.to_string(),
    };
    let value: f64 = text.trim().parse().map_err(|_| err())?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(err())
    }
}
