//! Application state for the web layer.

use std::sync::Arc;

use crate::aggregator::Aggregator;

/// Shared application state.
///
/// Generic over the stop source so routes can be exercised against
/// [`MockStopSource`](crate::source::MockStopSource).
pub struct AppState<S> {
    /// Stop view aggregator
    pub aggregator: Arc<Aggregator<S>>,
}

impl<S> AppState<S> {
    /// Create a new app state.
    pub fn new(aggregator: Aggregator<S>) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
        }
    }
}

// Manual impl: cloning only bumps the Arc, so `S` need not be `Clone`.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            aggregator: Arc::clone(&self.aggregator),
        }
    }
}
