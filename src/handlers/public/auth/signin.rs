// handlers/public/auth/signin.rs - POST /auth/signin

use axum::extract::State;
use serde::{Deserialize, Serialize};

use super::utils::require_fields;
use crate::auth::TokenPair;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninResponse {
    #[serde(flatten)]
    pub tokens: TokenPair,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// POST /auth/signin - Authenticate and receive an access/refresh token pair
///
/// Expected Output (Success):
/// ```json
/// {
///   "success": true,
///   "data": { "accessToken": "eyJ...", "refreshToken": "eyJ...", "expiresIn": 3600 }
/// }
/// ```
///
/// Unknown email and wrong password both answer 401 "Invalid credentials.".
pub async fn signin_post(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<SigninRequest>,
) -> ApiResult<SigninResponse> {
    let [email, password] = require_fields(
        [("email", payload.email), ("password", payload.password)],
        "Email and password are required.",
    )?;

    let tokens = state.identity.authenticate(&email, &password).await?;

    Ok(ApiResponse::success(SigninResponse {
        tokens,
        expires_in: state.tokens().access_ttl_secs(),
    }))
}
