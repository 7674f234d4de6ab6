use axum::{
    extract::{Path, State},
    Extension,
};
use serde::Deserialize;

use super::utils::{parse_entry_id, require_title_and_content};
use crate::database::models::{Entry, EntryChanges};
use crate::middleware::{ApiResponse, ApiResult, AuthUser, JsonBody};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateEntryRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// GET /entries/:id
pub async fn entry_get(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Entry> {
    let id = parse_entry_id(&id)?;
    let entry = state.entries.get(auth_user.account_id, id).await?;
    Ok(ApiResponse::success(entry))
}

/// PUT /entries/:id - Replace title and content
pub async fn entry_put(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateEntryRequest>,
) -> ApiResult<Entry> {
    let id = parse_entry_id(&id)?;
    let (title, content) = require_title_and_content(payload.title, payload.content)?;
    let changes = EntryChanges {
        title: Some(title),
        content: Some(content),
    };

    let entry = state
        .entries
        .update(auth_user.account_id, id, changes)
        .await?;
    Ok(ApiResponse::success(entry))
}

/// PATCH /entries/:id - Change whichever of title and content are present
pub async fn entry_patch(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateEntryRequest>,
) -> ApiResult<Entry> {
    let id = parse_entry_id(&id)?;
    let changes = EntryChanges {
        title: payload.title,
        content: payload.content,
    };

    let entry = state
        .entries
        .update(auth_user.account_id, id, changes)
        .await?;
    Ok(ApiResponse::success(entry))
}

/// DELETE /entries/:id
pub async fn entry_delete(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_entry_id(&id)?;
    state.entries.delete(auth_user.account_id, id).await?;
    Ok(ApiResponse::no_content())
}
