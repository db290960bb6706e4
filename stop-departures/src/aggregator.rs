//! Combines stop metadata and live departures into a [`StopView`].

use chrono::Utc;
use tracing::debug;

use crate::domain::StopView;
use crate::error::StopError;
use crate::source::StopSource;

/// Builds stop views from a [`StopSource`].
///
/// Each call fetches details and then departures, in that order, and
/// fails on the first error. Nothing is cached between calls.
#[derive(Debug)]
pub struct Aggregator<S> {
    source: S,
}

impl<S: StopSource> Aggregator<S> {
    /// Create a new aggregator over `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get the stop view for `stop_id`.
    ///
    /// Fails with [`StopError::InvalidInput`] for non-positive IDs without
    /// touching the source. If the details lookup fails, departures are not
    /// fetched; if departures fail, the fetched details are discarded.
    #[tracing::instrument(skip(self))]
    pub async fn get_departures(&self, stop_id: i64) -> Result<StopView, StopError> {
        if stop_id <= 0 {
            return Err(StopError::InvalidInput { stop_id });
        }

        let details = self.source.fetch_details(stop_id).await?;
        let departures = self.source.fetch_departures(stop_id).await?;

        debug!(
            name = %details.name,
            departures = departures.len(),
            "assembled stop view"
        );

        Ok(StopView::new(stop_id, details, departures, Utc::now()))
    }
}

#[cfg(test)]
#[path = "aggregator_tests.rs"]
mod tests;
