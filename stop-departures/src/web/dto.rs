//! Data transfer objects for web responses.
//!
//! Successful responses serialize [`StopView`](crate::domain::StopView)
//! directly; only errors need a wrapper.

use serde::{Deserialize, Serialize};

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
