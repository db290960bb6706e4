//! Web layer for stop departures.
//!
//! Exposes the aggregated stop view as JSON over HTTP.

mod dto;
mod routes;
mod state;

pub use dto::ErrorResponse;
pub use routes::{AppError, DEPARTURES_ROUTE, create_router};
pub use state::AppState;
