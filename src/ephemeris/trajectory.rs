use chrono::{DateTime, Utc};
use serde::Serialize;

use super::epoch::Epoch;
use super::error::EphemerisError;
use super::state_vector::{RawStateVector, StateVector};

/// Time span a feed claims to cover (`START_TIME` / `STOP_TIME`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coverage {
    pub start: Epoch,
    pub stop: Epoch,
}

impl Coverage {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start.instant() <= instant && instant <= self.stop.instant()
    }
}

/// The ordered state vectors of one loaded feed.
///
/// Epochs are strictly increasing in index order. The feed guarantees this;
/// it is not re-checked here.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Trajectory {
    vectors: Vec<StateVector>,
    coverage: Option<Coverage>,
}

impl Trajectory {
    pub fn new(vectors: Vec<StateVector>) -> Self {
        Self {
            vectors,
            coverage: None,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Converts every raw record or none of them.
    pub fn from_raw(records: &[RawStateVector]) -> Result<Self, EphemerisError> {
        let vectors = records
            .iter()
            .map(StateVector::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(vectors))
    }

    pub fn with_coverage(mut self, coverage: Coverage) -> Self {
        self.coverage = Some(coverage);
        self
    }

    pub fn coverage(&self) -> Option<&Coverage> {
        self.coverage.as_ref()
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StateVector> {
        self.vectors.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StateVector> {
        self.vectors.iter()
    }

    pub fn as_slice(&self) -> &[StateVector] {
        &self.vectors
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a StateVector;
    type IntoIter = std::slice::Iter<'a, StateVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.vectors.iter()
    }
}
