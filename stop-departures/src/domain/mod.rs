//! Domain types for stop departures.
//!
//! Stop metadata comes from the relational store, departures from the
//! NexTrip API. Both are combined into a [`StopView`] per request.

mod departure;
mod stop;
mod time;

pub use departure::StopDeparture;
pub use stop::{StopDetails, StopView};
pub use time::{ENCODED_LEN, MalformedTimestamp, decode_departure_time};
