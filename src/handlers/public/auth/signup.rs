// handlers/public/auth/signup.rs - POST /auth/signup

use axum::extract::State;
use serde::Deserialize;
use serde_json::{json, Value};

use super::utils::require_fields;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /auth/signup - Register a new account
///
/// Expected Input:
/// ```json
/// { "email": "string", "password": "string" }
/// ```
///
/// Responds 201 with a confirmation, or 400 when a field is missing, the email
/// is malformed, or an account with that email already exists.
pub async fn signup_post(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<SignupRequest>,
) -> ApiResult<Value> {
    let [email, password] = require_fields(
        [("email", payload.email), ("password", payload.password)],
        "Email and password are required.",
    )?;

    let account = state.identity.register(&email, &password).await?;

    Ok(ApiResponse::created(json!({
        "message": "User registered successfully.",
        "id": account.id,
        "email": account.email,
    })))
}
