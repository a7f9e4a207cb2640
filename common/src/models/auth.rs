//! Login request model.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Request body for `POST /login`.
#[derive(Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Gradescope account email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Gradescope account password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"******")
            .finish()
    }
}
