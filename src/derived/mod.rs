mod geodetic;
mod speed;
mod time_index;

pub use geodetic::{
    sidereal_correction_deg, wrap_longitude, GeodeticPosition, GeodeticProjector,
    FRAME_ALIGNMENT_OFFSET_DEG, MEAN_EARTH_RADIUS_KM,
};
pub use speed::{average_speed, speed};
pub use time_index::{closest_to, Closest, EpochTimeIndex, DEFAULT_CLOCK_SKEW};
