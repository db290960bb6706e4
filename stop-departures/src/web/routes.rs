//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tracing::{error, warn};

use crate::domain::StopView;
use crate::error::StopError;
use crate::source::StopSource;

use super::dto::ErrorResponse;
use super::state::AppState;

/// Route for a stop's details and live departures.
pub const DEPARTURES_ROUTE: &str = "/stops/:stop_id/departures";

/// Create the application router.
pub fn create_router<S>(state: AppState<S>) -> Router
where
    S: StopSource + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route(DEPARTURES_ROUTE, get(stop_departures::<S>))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Stop metadata plus live departures.
async fn stop_departures<S>(
    State(state): State<AppState<S>>,
    Path(stop_id): Path<i64>,
) -> Result<Json<StopView>, AppError>
where
    S: StopSource + Send + Sync + 'static,
{
    let view = state.aggregator.get_departures(stop_id).await?;
    Ok(Json(view))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
    Unavailable { message: String },
}

impl From<StopError> for AppError {
    fn from(e: StopError) -> Self {
        let message = e.to_string();
        match e {
            StopError::InvalidInput { .. } | StopError::BadRequest { .. } => {
                AppError::BadRequest { message }
            }
            StopError::NotFound { .. } => AppError::NotFound { message },
            StopError::MalformedPayload { .. } => AppError::BadGateway { message },
            StopError::SourceUnavailable(_) => AppError::Unavailable { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
