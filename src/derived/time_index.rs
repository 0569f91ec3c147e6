use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::ephemeris::{EphemerisError, StateVector, Trajectory};

/// Correction added to the caller's clock before it is compared with feed
/// epochs. Zero means both clocks are taken to be UTC.
pub const DEFAULT_CLOCK_SKEW: Duration = Duration::zero();

/// The state vector nearest in time to a queried instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Closest<'a> {
    pub state: &'a StateVector,
    /// `instant - epoch` in seconds; negative when the epoch lies after the
    /// queried instant.
    pub offset_seconds: f64,
}

/// Answers "which sample is current" queries over a trajectory.
///
/// The search is a linear scan. Feeds hold a few thousand samples, so no
/// search structure is kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochTimeIndex {
    skew: Duration,
}

impl Default for EpochTimeIndex {
    fn default() -> Self {
        Self {
            skew: DEFAULT_CLOCK_SKEW,
        }
    }
}

impl EpochTimeIndex {
    pub fn with_skew(skew: Duration) -> Self {
        Self { skew }
    }

    pub fn skew(&self) -> Duration {
        self.skew
    }

    /// The caller's instant on the feed clock.
    pub fn corrected(&self, instant: DateTime<Utc>) -> Result<DateTime<Utc>, EphemerisError> {
        instant
            .checked_add_signed(self.skew)
            .ok_or_else(|| EphemerisError::SkewOverflow {
                instant: instant.to_rfc3339(),
                skew: self.skew.to_string(),
            })
    }

    /// Finds the sample minimizing `|instant + skew - epoch|`. Ties go to the
    /// lowest index.
    pub fn closest_to<'a>(
        &self,
        trajectory: &'a Trajectory,
        instant: DateTime<Utc>,
    ) -> Result<Closest<'a>, EphemerisError> {
        let corrected = self.corrected(instant)?;
        let mut best: Option<Closest<'a>> = None;

        for state in trajectory {
            let offset_seconds = seconds(corrected - state.epoch.instant());
            let closer = match &best {
                Some(b) => offset_seconds.abs() < b.offset_seconds.abs(),
                None => true,
            };
            if closer {
                best = Some(Closest {
                    state,
                    offset_seconds,
                });
            }
        }

        let best = best.ok_or(EphemerisError::EmptyInput)?;
        log::debug!(
            "closest epoch to {} is {} ({:+.3} s)",
            corrected,
            best.state.epoch,
            best.offset_seconds
        );
        Ok(best)
    }
}

/// [`EpochTimeIndex::closest_to`] with no clock skew.
pub fn closest_to(
    trajectory: &Trajectory,
    instant: DateTime<Utc>,
) -> Result<Closest<'_>, EphemerisError> {
    EpochTimeIndex::default().closest_to(trajectory, instant)
}

fn seconds(delta: Duration) -> f64 {
    delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) * 1e-9
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::{Epoch, Position, Velocity};
    use rstest::*;

    const FIRST: &str = "2024-045T12:04:00.000Z";
    const SECOND: &str = "2024-045T12:05:00.000Z";

    #[fixture]
    fn trajectory() -> Trajectory {
        Trajectory::new(
            [FIRST, SECOND]
                .iter()
                .map(|e| {
                    StateVector::new(
                        Epoch::parse(e).unwrap(),
                        Position::new(100.0, 200.0, 300.0),
                        Velocity::new(1.0, 2.0, 3.0),
                    )
                })
                .collect(),
        )
    }

    fn after_first(secs: i64) -> DateTime<Utc> {
        Epoch::parse(FIRST).unwrap().instant() + Duration::seconds(secs)
    }

    #[rstest]
    fn ten_seconds_after_first_sample(trajectory: Trajectory) {
        let closest = closest_to(&trajectory, after_first(10)).unwrap();
        assert_eq!(closest.state.epoch.id(), FIRST);
        assert_eq!(closest.offset_seconds, 10.0);
    }

    #[rstest]
    fn future_epoch_has_negative_offset(trajectory: Trajectory) {
        let closest = closest_to(&trajectory, after_first(40)).unwrap();
        assert_eq!(closest.state.epoch.id(), SECOND);
        assert_eq!(closest.offset_seconds, -20.0);
    }

    #[rstest]
    fn ties_go_to_first_sample(trajectory: Trajectory) {
        let closest = closest_to(&trajectory, after_first(30)).unwrap();
        assert_eq!(closest.state.epoch.id(), FIRST);
        assert_eq!(closest.offset_seconds, 30.0);
    }

    #[rstest]
    fn before_the_feed_picks_first(trajectory: Trajectory) {
        let closest = closest_to(&trajectory, after_first(-3600)).unwrap();
        assert_eq!(closest.state.epoch.id(), FIRST);
        assert_eq!(closest.offset_seconds, -3600.0);
    }

    #[rstest]
    fn skew_shifts_the_caller_clock(trajectory: Trajectory) {
        let index = EpochTimeIndex::with_skew(Duration::seconds(50));
        let closest = index.closest_to(&trajectory, after_first(0)).unwrap();
        assert_eq!(closest.state.epoch.id(), SECOND);
        assert_eq!(closest.offset_seconds, -10.0);
    }

    #[rstest]
    fn skew_past_the_calendar_is_an_error(trajectory: Trajectory) {
        let index = EpochTimeIndex::with_skew(Duration::MAX);
        assert!(matches!(
            index.closest_to(&trajectory, after_first(0)),
            Err(EphemerisError::SkewOverflow { .. })
        ));

        let index = EpochTimeIndex::with_skew(Duration::MIN);
        assert!(matches!(
            index.corrected(DateTime::<Utc>::MIN_UTC),
            Err(EphemerisError::SkewOverflow { .. })
        ));
    }

    #[test]
    fn sub_second_offsets_are_kept() {
        assert_eq!(seconds(Duration::milliseconds(-1500)), -1.5);
        assert_eq!(seconds(Duration::milliseconds(250)), 0.25);
    }

    #[test]
    fn empty_trajectory_fails() {
        assert_eq!(
            closest_to(&Trajectory::empty(), Utc::now()),
            Err(EphemerisError::EmptyInput)
        );
    }
}
