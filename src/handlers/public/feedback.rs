// handlers/public/feedback.rs - POST /feedback

use axum::{extract::State, Extension};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::database::models::EntryId;
use crate::error::ApiError;
use crate::feedback;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, JsonBody};
use crate::services::ServiceError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub content: Option<String>,
    /// Number or numeric string; anything else is ignored
    #[serde(default)]
    pub entry_id: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub feedback: String,
}

/// POST /feedback - Generate feedback for a piece of text
///
/// Always answers with the generated text. When the caller is signed in and
/// names one of their own entries via `entryId`, the text is also saved on
/// that entry. A failed save never changes the response.
pub async fn feedback_post(
    State(state): State<AppState>,
    auth_user: Option<Extension<AuthUser>>,
    JsonBody(payload): JsonBody<FeedbackRequest>,
) -> ApiResult<FeedbackResponse> {
    let content = payload
        .content
        .filter(|content| !content.is_empty())
        .ok_or_else(|| ApiError::field_error("content", "Content is required."))?;

    let generated = feedback::generate(&content);

    match (payload.entry_id, auth_user) {
        (None | Some(Value::Null), _) => {}
        (Some(_), None) => {
            debug!("Feedback requested for an entry without credentials; not saving");
        }
        (Some(raw), Some(Extension(user))) => match parse_entry_id(&raw) {
            Some(entry_id) => {
                attach(&state, &user, entry_id, generated.clone()).await;
            }
            None => warn!("Ignoring unparseable entryId {}", raw),
        },
    }

    Ok(ApiResponse::success(FeedbackResponse {
        feedback: generated,
    }))
}

async fn attach(state: &AppState, user: &AuthUser, entry_id: EntryId, text: String) {
    match state
        .entries
        .attach_feedback(user.account_id, entry_id, text)
        .await
    {
        Ok(_) => debug!("Feedback saved on entry {}", entry_id),
        Err(ServiceError::NotFound) => warn!(
            "Feedback not saved: entry {} not found for account {}",
            entry_id, user.account_id
        ),
        Err(e) => warn!("Feedback not saved on entry {}: {}", entry_id, e),
    }
}

fn parse_entry_id(raw: &Value) -> Option<EntryId> {
    match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
