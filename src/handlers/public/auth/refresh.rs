// handlers/public/auth/refresh.rs - POST /auth/refresh

use axum::extract::State;
use serde::{Deserialize, Serialize};

use super::utils::require_fields;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
    pub expires_in: i64,
}

/// POST /auth/refresh - Exchange the long-lived refresh token for a new access token
///
/// Access tokens are refused here, and so are refresh tokens whose account is gone.
pub async fn refresh_post(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RefreshRequest>,
) -> ApiResult<RefreshResponse> {
    let [refresh_token] = require_fields(
        [("refreshToken", payload.refresh_token)],
        "Refresh token is required.",
    )?;

    let access_token = state.identity.refresh(&refresh_token).await?;

    Ok(ApiResponse::success(RefreshResponse {
        access_token,
        expires_in: state.tokens().access_ttl_secs(),
    }))
}
