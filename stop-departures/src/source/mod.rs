//! Data sources for stop metadata and live departures.
//!
//! Stop metadata lives in a PostgreSQL GTFS stops table; departures come
//! from the Metro Transit NexTrip API. [`StopSource`] puts both behind one
//! interface so the aggregator can be tested against [`MockStopSource`].

mod default;
mod mock;
mod nextrip;
mod stops_table;

use std::future::Future;

pub use default::DefaultStopSource;
pub use mock::MockStopSource;
pub use nextrip::{NexTripClient, NexTripConfig};
pub use stops_table::{StopRow, StopsTable};

use crate::domain::{StopDeparture, StopDetails};
use crate::error::StopError;

/// Trait for fetching stop metadata and departures.
///
/// The two operations are independent and may be called in either order.
pub trait StopSource {
    /// Look up static metadata for a stop.
    ///
    /// Fails with [`StopError::NotFound`] if no row matches.
    fn fetch_details(
        &self,
        stop_id: i64,
    ) -> impl Future<Output = Result<StopDetails, StopError>> + Send;

    /// Fetch live departures for a stop, in API order.
    fn fetch_departures(
        &self,
        stop_id: i64,
    ) -> impl Future<Output = Result<Vec<StopDeparture>, StopError>> + Send;
}
