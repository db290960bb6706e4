//! Stop metadata and the aggregated stop view.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::StopDeparture;

/// Static metadata for one stop, as held in the GTFS stops table.
///
/// Every column in the table is nullable; a NULL column is represented here
/// by the field's zero value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StopDetails {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub zone_id: String,
    pub url: String,
    /// GTFS `location_type` (0 = stop, 1 = station, ...).
    pub location_type: i64,
    /// GTFS `wheelchair_boarding` (0 = unknown, 1 = accessible, 2 = not).
    pub wheelchair_boarding: i64,
}

/// Stop metadata combined with its live departures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopView {
    /// The stop ID the caller asked for.
    pub stop_id: i64,

    /// The stop's display name.
    pub description: String,

    /// Departures in the order the API returned them.
    pub departures: Vec<StopDeparture>,

    #[serde(rename = "stop_details")]
    pub details: StopDetails,

    /// When this view was assembled.
    pub update_time: DateTime<Utc>,
}

impl StopView {
    /// Assemble a view from fetched details and departures.
    pub fn new(
        stop_id: i64,
        details: StopDetails,
        departures: Vec<StopDeparture>,
        update_time: DateTime<Utc>,
    ) -> Self {
        Self {
            stop_id,
            description: details.name.clone(),
            departures,
            details,
            update_time,
        }
    }
}
