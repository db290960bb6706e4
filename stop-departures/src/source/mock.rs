//! In-memory stop source for testing without a database or network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{StopDeparture, StopDetails};
use crate::error::StopError;

use super::StopSource;

/// Mock source that serves fixed stops and departures.
///
/// Stops without configured departures answer like NexTrip does for an
/// unknown stop: with a 400 [`StopError::BadRequest`]. Call counts are
/// tracked per operation so tests can assert which sources were touched.
#[derive(Debug, Default)]
pub struct MockStopSource {
    stops: HashMap<i64, StopDetails>,
    departures: HashMap<i64, Vec<StopDeparture>>,
    details_calls: AtomicUsize,
    departures_calls: AtomicUsize,
}

impl MockStopSource {
    /// Create an empty mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stop, keyed by its `id`.
    pub fn with_stop(mut self, details: StopDetails) -> Self {
        self.stops.insert(details.id, details);
        self
    }

    /// Set the departures returned for `stop_id`.
    pub fn with_departures(mut self, stop_id: i64, departures: Vec<StopDeparture>) -> Self {
        self.departures.insert(stop_id, departures);
        self
    }

    /// Number of `fetch_details` calls so far.
    pub fn details_calls(&self) -> usize {
        self.details_calls.load(Ordering::SeqCst)
    }

    /// Number of `fetch_departures` calls so far.
    pub fn departures_calls(&self) -> usize {
        self.departures_calls.load(Ordering::SeqCst)
    }
}

impl StopSource for MockStopSource {
    async fn fetch_details(&self, stop_id: i64) -> Result<StopDetails, StopError> {
        self.details_calls.fetch_add(1, Ordering::SeqCst);
        self.stops
            .get(&stop_id)
            .cloned()
            .ok_or(StopError::NotFound { stop_id })
    }

    async fn fetch_departures(&self, stop_id: i64) -> Result<Vec<StopDeparture>, StopError> {
        self.departures_calls.fetch_add(1, Ordering::SeqCst);
        self.departures
            .get(&stop_id)
            .cloned()
            .ok_or_else(|| StopError::BadRequest {
                status: 400,
                message: format!("no departures for stop {stop_id}"),
            })
    }
}
