//! Response bodies shared by the API endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body returned for every failed request.
///
/// `detail` carries the human-readable message; frontends read it directly.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub detail: String,
    /// Error code for client handling (e.g. `NOT_LOGGED_IN`, `UPSTREAM_NETWORK`).
    pub code: String,
}

/// Plain acknowledgement.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Acknowledgement of a successful login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    /// The email address that was logged in.
    pub email: String,
}

/// Health probe response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `healthy` while the process is serving.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
    /// Current timestamp.
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy(service: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            service: service.into(),
            version: version.into(),
            timestamp: Utc::now(),
        }
    }
}
