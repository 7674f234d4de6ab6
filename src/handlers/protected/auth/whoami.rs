use axum::{extract::State, Extension};

use crate::database::models::Account;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /auth/whoami - The account behind the access token
///
/// Answers 401 if the account was removed after the token was issued.
pub async fn whoami_get(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Account> {
    let account = state.identity.whoami(auth_user.account_id).await?;
    Ok(ApiResponse::success(account))
}
