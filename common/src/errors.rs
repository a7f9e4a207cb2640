//! Unified error type for the HTTP layer.
//!
//! Every handler returns [`AppResult`]; the error converts into a JSON body of
//! the form `{"detail": "...", "code": "..."}` with the matching status code.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::ErrorBody;

/// Result alias used by handlers and services.
pub type AppResult<T> = Result<T, AppError>;

/// Errors surfaced to API callers.
#[derive(Debug, Error)]
pub enum AppError {
    /// No active Gradescope session.
    #[error("Not logged in. Please login first.")]
    NotLoggedIn,

    /// Gradescope rejected the login attempt.
    #[error("Login failed: {0}")]
    LoginFailed(String),

    /// A collaborator call failed while serving a listing request.
    #[error("Failed to fetch {context}: {message}")]
    Upstream {
        /// What was being fetched, e.g. `courses`.
        context: &'static str,
        /// Machine-readable failure class.
        code: &'static str,
        message: String,
    },

    /// Request body failed validation.
    #[error("{0}")]
    Validation(String),
}

impl AppError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotLoggedIn | AppError::LoginFailed(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotLoggedIn => "NOT_LOGGED_IN",
            AppError::LoginFailed(_) => "LOGIN_FAILED",
            AppError::Upstream { code, .. } => *code,
            AppError::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let reason = errs
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .next()
                    .unwrap_or_else(|| "is invalid".to_string());
                format!("{field}: {reason}")
            })
            .collect();
        fields.sort();
        AppError::Validation(fields.join("; "))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "请求失败");
        } else {
            tracing::warn!(code = self.code(), error = %self, "请求被拒绝");
        }

        let body = ErrorBody {
            detail: self.to_string(),
            code: self.code().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
