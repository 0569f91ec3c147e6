use serde::Serialize;

use crate::ephemeris::StateVector;

/// Spherical Earth radius used for altitude, km.
pub const MEAN_EARTH_RADIUS_KM: f64 = 6371.0;

/// Longitude of the inertial x axis at hour 12, minute 0 of a feed epoch.
pub const FRAME_ALIGNMENT_OFFSET_DEG: f64 = 32.0;

const EARTH_ROTATION_DEG_PER_HOUR: f64 = 360.0 / 24.0;

/// Approximate ground position of a state vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeodeticPosition {
    /// Geocentric latitude, degrees.
    pub latitude_deg: f64,
    /// Degrees in `[-180, 180]`.
    pub longitude_deg: f64,
    pub altitude_km: f64,
}

/// Projects inertial positions onto a spherical, uniformly rotating Earth.
///
/// This is deliberately coarse: latitude is geocentric (no ellipsoid), and the
/// frame rotation is read off the epoch's hour and minute rather than from
/// sidereal time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticProjector {
    offset_deg: f64,
}

impl Default for GeodeticProjector {
    fn default() -> Self {
        Self {
            offset_deg: FRAME_ALIGNMENT_OFFSET_DEG,
        }
    }
}

impl GeodeticProjector {
    pub fn with_offset(offset_deg: f64) -> Self {
        Self { offset_deg }
    }

    pub fn offset_deg(&self) -> f64 {
        self.offset_deg
    }

    pub fn project(&self, state: &StateVector) -> GeodeticPosition {
        let p = &state.position;

        let latitude_deg = p.z.atan2((p.x * p.x + p.y * p.y).sqrt()).to_degrees();
        let raw_longitude = p.y.atan2(p.x).to_degrees();
        let correction = sidereal_correction_deg(state.epoch.hour(), state.epoch.minute());
        let longitude_deg = wrap_longitude(raw_longitude - correction + self.offset_deg);
        let altitude_km = p.radius_km() - MEAN_EARTH_RADIUS_KM;

        log::debug!(
            "{}: lat {:.4} lon {:.4} alt {:.2} km",
            state.epoch,
            latitude_deg,
            longitude_deg,
            altitude_km
        );

        GeodeticPosition {
            latitude_deg,
            longitude_deg,
            altitude_km,
        }
    }
}

/// Earth rotation since 12:00 of the epoch's day, in degrees.
pub fn sidereal_correction_deg(hour: u32, minute: u32) -> f64 {
    ((f64::from(hour) - 12.0) + f64::from(minute) / 60.0) * EARTH_ROTATION_DEG_PER_HOUR
}

/// Brings a longitude into `[-180, 180]`. Values already in range are
/// returned as is.
pub fn wrap_longitude(longitude_deg: f64) -> f64 {
    if (-180.0..=180.0).contains(&longitude_deg) {
        longitude_deg
    } else {
        (longitude_deg + 540.0).rem_euclid(360.0) - 180.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::{Epoch, Position, Velocity};
    use rstest::*;

    fn state_at(epoch: &str, x: f64, y: f64, z: f64) -> StateVector {
        StateVector::new(
            Epoch::parse(epoch).unwrap(),
            Position::new(x, y, z),
            Velocity::new(0.0, 0.0, 0.0),
        )
    }

    #[test]
    fn latitude_and_altitude_at_noon() {
        let state = state_at("2024-045T12:00:00.000Z", 100.0, 200.0, 300.0);
        let position = GeodeticProjector::default().project(&state);

        let expected_alt = (100.0_f64 * 100.0 + 200.0 * 200.0 + 300.0 * 300.0).sqrt() - 6371.0;
        let expected_lat = 300.0_f64.atan2((100.0_f64 * 100.0 + 200.0 * 200.0).sqrt()).to_degrees();
        assert_eq!(position.altitude_km, expected_alt);
        assert_eq!(position.latitude_deg, expected_lat);
    }

    #[test]
    fn longitude_at_noon_is_raw_plus_offset() {
        let state = state_at("2024-045T12:00:00.000Z", 100.0, 200.0, 300.0);
        let position = GeodeticProjector::default().project(&state);
        let expected = 200.0_f64.atan2(100.0).to_degrees() + FRAME_ALIGNMENT_OFFSET_DEG;
        assert_eq!(position.longitude_deg, expected);
    }

    #[test]
    fn longitude_follows_earth_rotation() {
        // 18:30 is 6.5 h after noon: 97.5 degrees of rotation.
        let state = state_at("2024-045T18:30:00.000Z", 1.0, 0.0, 0.0);
        let position = GeodeticProjector::with_offset(0.0).project(&state);
        assert_eq!(position.longitude_deg, -97.5);
    }

    #[test]
    fn corrected_longitude_is_wrapped() {
        // raw 90, correction -180 (00:00), offset 32 => 302 => -58
        let state = state_at("2024-045T00:00:00.000Z", 0.0, 1.0, 0.0);
        let position = GeodeticProjector::default().project(&state);
        assert!((position.longitude_deg - -58.0).abs() < 1e-9);
    }

    #[rstest]
    #[case(12, 0, 0.0)]
    #[case(13, 0, 15.0)]
    #[case(11, 30, -7.5)]
    #[case(0, 0, -180.0)]
    #[case(23, 45, 176.25)]
    fn sidereal_correction(#[case] hour: u32, #[case] minute: u32, #[case] expected: f64) {
        assert_eq!(sidereal_correction_deg(hour, minute), expected);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(180.0, 180.0)]
    #[case(-180.0, -180.0)]
    #[case(179.5, 179.5)]
    #[case(190.0, -170.0)]
    #[case(-190.0, 170.0)]
    #[case(360.0, 0.0)]
    #[case(540.0, -180.0)]
    #[case(725.0, 5.0)]
    #[case(-1000.0, 80.0)]
    fn wrap_cases(#[case] input: f64, #[case] expected: f64) {
        assert!((wrap_longitude(input) - expected).abs() < 1e-9);
    }

    #[test]
    fn wrap_stays_in_range_and_is_idempotent() {
        let mut value = -5000.0;
        while value <= 5000.0 {
            let once = wrap_longitude(value);
            assert!((-180.0..=180.0).contains(&once), "{} -> {}", value, once);
            assert_eq!(wrap_longitude(once), once);
            value += 7.25;
        }
    }

    /// Mirror-image fold: `lon > 180 -> 360 - lon`, `lon < -180 -> -360 - lon`.
    fn reflect(lon: f64) -> f64 {
        if lon.abs() > 180.0 {
            if lon > 0.0 {
                360.0 - lon
            } else {
                -360.0 - lon
            }
        } else {
            lon
        }
    }

    #[test]
    fn agrees_with_reflection_in_range() {
        let mut lon = -180.0;
        while lon <= 180.0 {
            assert_eq!(wrap_longitude(lon), reflect(lon), "{}", lon);
            lon += 0.125;
        }
    }

    #[test]
    fn diverges_from_reflection_past_180() {
        assert_eq!(reflect(190.0), 170.0);
        assert_eq!(wrap_longitude(190.0), -170.0);
        assert_eq!(reflect(-190.0), -170.0);
        assert_eq!(wrap_longitude(-190.0), 170.0);
    }
}
