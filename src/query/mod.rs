mod window;

pub use window::{by_epoch_id, epoch_ids, window};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::derived::{average_speed, EpochTimeIndex, GeodeticPosition, GeodeticProjector};
use crate::ephemeris::{Coverage, EphemerisError, StateVector, Trajectory};

pub const SPEED_UNITS: &str = "km/s";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedReport {
    pub value: f64,
    pub units: &'static str,
}

impl SpeedReport {
    fn km_s(value: f64) -> Self {
        Self {
            value,
            units: SPEED_UNITS,
        }
    }
}

/// The sample closest to a queried instant, with what can be derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NowReport {
    pub closest_epoch: String,
    pub seconds_from_now: f64,
    pub speed: SpeedReport,
    pub location: GeodeticPosition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedSummary {
    pub samples: usize,
    pub coverage: Option<Coverage>,
    pub average_speed: SpeedReport,
}

/// Read-only queries over one trajectory, configured with the time index and
/// projector the service was set up with.
#[derive(Debug, Clone, Copy)]
pub struct TrajectoryQuery<'a> {
    trajectory: &'a Trajectory,
    index: EpochTimeIndex,
    projector: GeodeticProjector,
}

impl<'a> TrajectoryQuery<'a> {
    pub fn new(trajectory: &'a Trajectory) -> Self {
        Self {
            trajectory,
            index: EpochTimeIndex::default(),
            projector: GeodeticProjector::default(),
        }
    }

    pub fn with_index(mut self, index: EpochTimeIndex) -> Self {
        self.index = index;
        self
    }

    pub fn with_projector(mut self, projector: GeodeticProjector) -> Self {
        self.projector = projector;
        self
    }

    pub fn epoch_ids(&self) -> Vec<&'a str> {
        epoch_ids(self.trajectory)
    }

    pub fn window(&self, offset: i64, limit: i64) -> Result<&'a [StateVector], EphemerisError> {
        window(self.trajectory, offset, limit)
    }

    pub fn epochs(&self, offset: i64, limit: i64) -> Result<Vec<&'a str>, EphemerisError> {
        Ok(self
            .window(offset, limit)?
            .iter()
            .map(|sv| sv.epoch.id())
            .collect())
    }

    pub fn state(&self, id: &str) -> Result<&'a StateVector, EphemerisError> {
        by_epoch_id(self.trajectory, id)
    }

    pub fn speed(&self, id: &str) -> Result<SpeedReport, EphemerisError> {
        let state = self.state(id)?;
        Ok(SpeedReport::km_s(state.velocity.speed()))
    }

    pub fn location(&self, id: &str) -> Result<GeodeticPosition, EphemerisError> {
        let state = self.state(id)?;
        Ok(self.projector.project(state))
    }

    pub fn average_speed(&self) -> Result<SpeedReport, EphemerisError> {
        average_speed(self.trajectory).map(SpeedReport::km_s)
    }

    pub fn now(&self, instant: DateTime<Utc>) -> Result<NowReport, EphemerisError> {
        let corrected = self.index.corrected(instant)?;
        if let Some(coverage) = self.trajectory.coverage() {
            if !coverage.contains(corrected) {
                log::warn!(
                    "{} is outside the feed coverage {} .. {}",
                    instant,
                    coverage.start,
                    coverage.stop
                );
            }
        }

        let closest = self.index.closest_to(self.trajectory, instant)?;
        Ok(NowReport {
            closest_epoch: closest.state.epoch.id().to_string(),
            seconds_from_now: closest.offset_seconds,
            speed: SpeedReport::km_s(closest.state.velocity.speed()),
            location: self.projector.project(closest.state),
        })
    }

    pub fn summary(&self) -> Result<FeedSummary, EphemerisError> {
        Ok(FeedSummary {
            samples: self.trajectory.len(),
            coverage: self.trajectory.coverage().cloned(),
            average_speed: self.average_speed()?,
        })
    }
}
