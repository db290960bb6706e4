//! Predicted departures from the NexTrip API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::time::deserialize_departure_time;

/// One predicted (or observed) vehicle departure at a stop.
///
/// Deserializes from NexTrip's PascalCase JSON and serializes to snake_case.
/// Every field is taken verbatim from the payload except `departure_time`,
/// which is decoded from NexTrip's `\/Date(...)\/` encoding. Missing fields
/// default to zero values; a missing `DepartureTime` is an error.
///
/// There is no public `Default`, since any default time would be a made-up
/// instant:
///
/// ```compile_fail
/// let _ = stop_departures::domain::StopDeparture::default();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(test, derive(Default))]
#[serde(rename_all(serialize = "snake_case", deserialize = "PascalCase"))]
pub struct StopDeparture {
    /// True if the time is observed from vehicle location, false if scheduled.
    #[serde(default)]
    pub actual: bool,

    #[serde(default)]
    pub block_number: i64,

    /// Human-readable departure, e.g. "Due", "5 Min" or "10:42".
    #[serde(default)]
    pub departure_text: String,

    #[serde(deserialize_with = "deserialize_departure_time")]
    pub departure_time: DateTime<Utc>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub gate: String,

    #[serde(default)]
    pub route: String,

    #[serde(default)]
    pub route_direction: String,

    #[serde(default)]
    pub terminal: String,

    /// Vehicle heading in degrees.
    #[serde(default)]
    pub vehicle_heading: i32,

    #[serde(default)]
    pub vehicle_latitude: f64,

    #[serde(default)]
    pub vehicle_longitude: f64,
}
