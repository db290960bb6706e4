//! Transit stop departures service.
//!
//! Combines static stop metadata from a GTFS stops table with live
//! departure predictions from the Metro Transit NexTrip API, answering:
//! "what is this stop, and what is leaving from it next?"

pub mod aggregator;
pub mod config;
pub mod domain;
pub mod error;
pub mod source;
pub mod web;
