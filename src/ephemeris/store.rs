use std::sync::{Arc, PoisonError, RwLock};

use super::trajectory::Trajectory;

/// What the service currently holds.
///
/// `Cleared` and `Unloaded` are distinct: a feed that was loaded and then
/// dropped on request is not the same as one that never arrived.
#[derive(Debug, Clone, Default)]
pub enum FeedState {
    #[default]
    Unloaded,
    Loaded(Arc<Trajectory>),
    Cleared,
}

impl FeedState {
    pub fn trajectory(&self) -> Option<&Arc<Trajectory>> {
        match self {
            FeedState::Loaded(t) => Some(t),
            FeedState::Unloaded | FeedState::Cleared => None,
        }
    }
}

/// Single publication point for the current trajectory.
///
/// Writers build a trajectory completely and hand it over with
/// [`FeedStore::publish`]; readers take a [`FeedStore::snapshot`] and work on
/// their own `Arc` without holding the lock.
#[derive(Debug, Default)]
pub struct FeedStore {
    state: RwLock<FeedState>,
}

impl FeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, trajectory: Trajectory) {
        let samples = trajectory.len();
        let next = FeedState::Loaded(Arc::new(trajectory));
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = next;
        log::info!("published trajectory with {} state vectors", samples);
    }

    pub fn clear(&self) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = FeedState::Cleared;
        log::info!("trajectory cleared");
    }

    pub fn snapshot(&self) -> FeedState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn trajectory(&self) -> Option<Arc<Trajectory>> {
        self.snapshot().trajectory().cloned()
    }
}
