// handlers/public/auth/login.rs - POST /login handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::app::AppState;
use crate::auth::{INVALID_CREDENTIALS, PLACEHOLDER_TOKEN};
use crate::error::ApiError;

/// Login body. Both fields may be absent or null; unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Email and password with surrounding whitespace removed, empty when
    /// not provided.
    pub fn credentials(&self) -> (&str, &str) {
        (
            self.email.as_deref().unwrap_or_default().trim(),
            self.password.as_deref().unwrap_or_default().trim(),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub email: String,
    pub role: String,
    pub token: String,
}

/// POST /login - Authenticate against `auth_users`
///
/// Expected Input:
/// ```json
/// { "email": "string", "password": "string" }
/// ```
///
/// Success (200):
/// ```json
/// { "email": "a@b.com", "role": "admin", "token": "fake-jwt-token" }
/// ```
///
/// Failure (401):
/// ```json
/// { "message": "Identifiants invalides" }
/// ```
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(payload) = payload?;
    let (email, password) = payload.credentials();

    match state.store.find_by_credentials(email, password).await? {
        Some(user) => {
            info!(email = %user.email, role = %user.role, "login accepted");
            Ok(Json(LoginResponse {
                email: user.email,
                role: user.role,
                token: PLACEHOLDER_TOKEN.to_string(),
            }))
        }
        None => {
            warn!(email = %email, "login rejected");
            Err(ApiError::unauthorized(INVALID_CREDENTIALS))
        }
    }
}
