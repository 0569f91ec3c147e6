//! Derived quantities over a satellite ephemeris feed: speed, the sample
//! closest to a given instant, and an approximate ground position.
//!
//! Everything here works on an already materialized [`Trajectory`]; fetching
//! the feed and serving the results belong to the surrounding service.

pub mod config;
pub mod derived;
pub mod ephemeris;
pub mod query;

pub use config::{Config, ConfigError};
pub use derived::{
    average_speed, closest_to, speed, wrap_longitude, Closest, EpochTimeIndex, GeodeticPosition,
    GeodeticProjector,
};
pub use ephemeris::{
    parse_epoch, EphemerisError, Epoch, FeedDocument, FeedState, FeedStore, StateVector,
    Trajectory,
};
pub use query::{by_epoch_id, epoch_ids, window, TrajectoryQuery};
