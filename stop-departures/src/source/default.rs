//! Production source: PostgreSQL stops table plus the NexTrip API.

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::domain::{StopDeparture, StopDetails};
use crate::error::StopError;

use super::StopSource;
use super::nextrip::{NexTripClient, NexTripConfig};
use super::stops_table::StopsTable;

/// [`StopSource`] backed by a Postgres pool and an HTTP client.
///
/// Cheap to clone; both the pool and the client are shared handles.
#[derive(Debug, Clone)]
pub struct DefaultStopSource {
    stops: StopsTable,
    nextrip: NexTripClient,
}

impl DefaultStopSource {
    /// Build a source from already-constructed parts.
    pub fn new(stops: StopsTable, nextrip: NexTripClient) -> Self {
        Self { stops, nextrip }
    }

    /// Connect to the database and set up the NexTrip client.
    ///
    /// Fails if the database cannot be reached, so a misconfigured service
    /// stops at startup instead of on its first request.
    pub async fn connect(
        database: &DatabaseConfig,
        nextrip: NexTripConfig,
    ) -> Result<Self, StopError> {
        let pool = PgPoolOptions::new()
            .max_connections(database.max_connections)
            .connect_with(database.connect_options())
            .await?;

        info!(
            host = %database.host,
            database = %database.database,
            table = %database.stops_table,
            "connected to stops database"
        );

        let stops = StopsTable::new(pool, &database.stops_table);
        let nextrip = NexTripClient::new(nextrip)?;

        Ok(Self::new(stops, nextrip))
    }
}

impl StopSource for DefaultStopSource {
    async fn fetch_details(&self, stop_id: i64) -> Result<StopDetails, StopError> {
        self.stops.fetch(stop_id).await
    }

    async fn fetch_departures(&self, stop_id: i64) -> Result<Vec<StopDeparture>, StopError> {
        self.nextrip.get_departures(stop_id).await
    }
}
