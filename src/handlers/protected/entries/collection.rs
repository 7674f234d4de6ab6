use axum::{extract::State, Extension};
use serde::Deserialize;

use super::utils::require_title_and_content;
use crate::database::models::Entry;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, JsonBody};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// GET /entries - The caller's entries, newest first
pub async fn entries_list(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<Entry>> {
    let entries = state.entries.list(auth_user.account_id).await?;
    Ok(ApiResponse::success(entries))
}

/// POST /entries - Create an entry owned by the caller
///
/// Expected Input:
/// ```json
/// { "title": "string", "content": "string" }
/// ```
///
/// Any `feedback` in the body is ignored; feedback is only written through
/// POST /feedback.
pub async fn entry_create(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    JsonBody(payload): JsonBody<CreateEntryRequest>,
) -> ApiResult<Entry> {
    let (title, content) = require_title_and_content(payload.title, payload.content)?;
    let entry = state
        .entries
        .create(auth_user.account_id, title, content)
        .await?;
    Ok(ApiResponse::created(entry))
}
