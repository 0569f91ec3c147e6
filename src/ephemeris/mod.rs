mod document;
mod epoch;
mod error;
mod state_vector;
mod store;
mod trajectory;

pub use document::{DocumentError, FeedDocument};
pub use epoch::{parse_epoch, Epoch};
pub use error::EphemerisError;
pub use state_vector::{
    parse_component, Position, RawComponent, RawStateVector, StateVector, Velocity,
};
pub use store::{FeedState, FeedStore};
pub use trajectory::{Coverage, Trajectory};
