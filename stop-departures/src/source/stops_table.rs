//! GTFS stops table reader.

use sqlx::PgPool;
use tracing::debug;

use crate::domain::StopDetails;
use crate::error::StopError;

/// One row of the stops table, with every column nullable.
///
/// Columns are cast in the query so the table may use any numeric or text
/// types that convert cleanly. `stop_id` may be an integer or a text column.
#[derive(Debug, Clone, Default, PartialEq, sqlx::FromRow)]
pub struct StopRow {
    pub stop_id: Option<i64>,
    pub stop_code: Option<String>,
    pub stop_name: Option<String>,
    pub stop_desc: Option<String>,
    pub stop_lat: Option<f64>,
    pub stop_lon: Option<f64>,
    pub zone_id: Option<String>,
    pub stop_url: Option<String>,
    pub location_type: Option<i64>,
    pub wheelchair_boarding: Option<i64>,
}

impl From<StopRow> for StopDetails {
    /// NULL columns become zero values.
    fn from(row: StopRow) -> Self {
        StopDetails {
            id: row.stop_id.unwrap_or_default(),
            code: row.stop_code.unwrap_or_default(),
            name: row.stop_name.unwrap_or_default(),
            description: row.stop_desc.unwrap_or_default(),
            latitude: row.stop_lat.unwrap_or_default(),
            longitude: row.stop_lon.unwrap_or_default(),
            zone_id: row.zone_id.unwrap_or_default(),
            url: row.stop_url.unwrap_or_default(),
            location_type: row.location_type.unwrap_or_default(),
            wheelchair_boarding: row.wheelchair_boarding.unwrap_or_default(),
        }
    }
}

/// Builds the lookup query for a (pre-validated) table name.
///
/// The id is compared as text so the predicate works whatever type the
/// `stop_id` column has.
fn details_query(table: &str) -> String {
    format!(
        "SELECT stop_id::bigint AS stop_id,
                stop_code::text AS stop_code,
                stop_name::text AS stop_name,
                stop_desc::text AS stop_desc,
                stop_lat::double precision AS stop_lat,
                stop_lon::double precision AS stop_lon,
                zone_id::text AS zone_id,
                stop_url::text AS stop_url,
                location_type::bigint AS location_type,
                wheelchair_boarding::bigint AS wheelchair_boarding
         FROM {table} WHERE stop_id::text = $1"
    )
}

/// Read-only access to the stops table.
#[derive(Debug, Clone)]
pub struct StopsTable {
    pool: PgPool,
    query: String,
}

impl StopsTable {
    /// Create a reader over `table`.
    ///
    /// The table name is spliced into SQL; callers must pass a validated
    /// identifier (see [`DatabaseConfig`](crate::config::DatabaseConfig)).
    pub fn new(pool: PgPool, table: &str) -> Self {
        Self {
            pool,
            query: details_query(table),
        }
    }

    /// Fetch the row for `stop_id`, normalized to [`StopDetails`].
    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, stop_id: i64) -> Result<StopDetails, StopError> {
        let row: Option<StopRow> = sqlx::query_as(&self.query)
            .bind(stop_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                debug!(?row, "found stop row");
                Ok(row.into())
            }
            None => Err(StopError::NotFound { stop_id }),
        }
    }
}
