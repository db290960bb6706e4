//! Error types for stop lookups.

/// Why a data source could not be reached.
#[derive(Debug, thiserror::Error)]
pub enum Unavailable {
    /// Query against the stops table failed (connectivity, bad query, pool timeout)
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request failed (DNS, connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// NexTrip answered with a server error
    #[error("upstream error {status}: {message}")]
    Upstream { status: u16, message: String },
}

/// Errors from fetching or aggregating stop data.
///
/// Every variant is surfaced unchanged to the caller of
/// [`Aggregator::get_departures`](crate::aggregator::Aggregator::get_departures).
#[derive(Debug, thiserror::Error)]
pub enum StopError {
    /// Stop IDs must be positive
    #[error("invalid stop ID: {stop_id}")]
    InvalidInput { stop_id: i64 },

    /// No row in the stops table for this ID
    #[error("no stop with ID {stop_id}")]
    NotFound { stop_id: i64 },

    /// The database or the departures API could not be reached
    #[error("source unavailable: {0}")]
    SourceUnavailable(#[from] Unavailable),

    /// NexTrip rejected the request (4xx)
    #[error("bad request ({status}): {message}")]
    BadRequest { status: u16, message: String },

    /// The departures payload could not be parsed
    #[error("could not parse departures: {message}")]
    MalformedPayload {
        message: String,
        body: Option<String>,
    },
}

impl From<sqlx::Error> for StopError {
    fn from(err: sqlx::Error) -> Self {
        StopError::SourceUnavailable(Unavailable::Database(err))
    }
}

impl From<reqwest::Error> for StopError {
    fn from(err: reqwest::Error) -> Self {
        StopError::SourceUnavailable(Unavailable::Http(err))
    }
}
