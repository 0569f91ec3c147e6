use crate::ephemeris::{EphemerisError, StateVector, Trajectory};

/// Epoch identifiers in trajectory order.
pub fn epoch_ids(trajectory: &Trajectory) -> Vec<&str> {
    trajectory.iter().map(|sv| sv.epoch.id()).collect()
}

/// Elements `[offset, offset + limit)`, clipped to the trajectory.
///
/// An offset past the end yields an empty slice, as ordinary slicing would.
pub fn window(
    trajectory: &Trajectory,
    offset: i64,
    limit: i64,
) -> Result<&[StateVector], EphemerisError> {
    if offset < 0 || limit < 0 {
        return Err(EphemerisError::InvalidRange { offset, limit });
    }

    let all = trajectory.as_slice();
    let start = usize::try_from(offset).unwrap_or(usize::MAX).min(all.len());
    let len = usize::try_from(limit).unwrap_or(usize::MAX);
    let end = start.saturating_add(len).min(all.len());
    Ok(&all[start..end])
}

/// Exact string match on the epoch identifier.
pub fn by_epoch_id<'a>(trajectory: &'a Trajectory, id: &str) -> Result<&'a StateVector, EphemerisError> {
    trajectory
        .iter()
        .find(|sv| sv.epoch.id() == id)
        .ok_or_else(|| EphemerisError::NotFound(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::{Epoch, Position, Velocity};
    use rstest::*;

    #[fixture]
    fn trajectory() -> Trajectory {
        Trajectory::new(
            (0..6)
                .map(|minute| {
                    StateVector::new(
                        Epoch::parse(&format!("2024-045T12:{:02}:00.000Z", minute)).unwrap(),
                        Position::new(f64::from(minute), 0.0, 0.0),
                        Velocity::new(0.0, 0.0, 0.0),
                    )
                })
                .collect(),
        )
    }

    #[rstest]
    fn ids_keep_order(trajectory: Trajectory) {
        let ids = epoch_ids(&trajectory);
        assert_eq!(ids.len(), 6);
        assert_eq!(ids[0], "2024-045T12:00:00.000Z");
        assert_eq!(ids[5], "2024-045T12:05:00.000Z");
    }

    #[rstest]
    fn full_window_is_unchanged(trajectory: Trajectory) {
        let len = trajectory.len() as i64;
        assert_eq!(window(&trajectory, 0, len).unwrap(), trajectory.as_slice());
    }

    #[rstest]
    #[case(1, 2, &[1, 2])]
    #[case(4, 10, &[4, 5])]
    #[case(0, 0, &[])]
    #[case(6, 5, &[])]
    #[case(100, 5, &[])]
    #[case(2, i64::MAX, &[2, 3, 4, 5])]
    fn windows_are_clipped(
        trajectory: Trajectory,
        #[case] offset: i64,
        #[case] limit: i64,
        #[case] expected: &[usize],
    ) {
        let got: Vec<usize> = window(&trajectory, offset, limit)
            .unwrap()
            .iter()
            .map(|sv| sv.position.x as usize)
            .collect();
        assert_eq!(got, expected);
    }

    #[rstest]
    #[case(-1, 5)]
    #[case(0, -1)]
    #[case(-3, -3)]
    fn negative_bounds_fail(trajectory: Trajectory, #[case] offset: i64, #[case] limit: i64) {
        assert_eq!(
            window(&trajectory, offset, limit),
            Err(EphemerisError::InvalidRange { offset, limit })
        );
    }

    #[rstest]
    fn lookup_by_id(trajectory: Trajectory) {
        let found = by_epoch_id(&trajectory, "2024-045T12:03:00.000Z").unwrap();
        assert_eq!(found, trajectory.get(3).unwrap());
    }

    #[rstest]
    fn missing_id_is_not_found(trajectory: Trajectory) {
        assert_eq!(
            by_epoch_id(&trajectory, "2024-045T13:00:00.000Z"),
            Err(EphemerisError::NotFound("2024-045T13:00:00.000Z".into()))
        );
    }
}
