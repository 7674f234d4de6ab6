use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{Claims, TokenError, TokenKind};
use crate::database::models::AccountId;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated account context extracted from the access token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub account_id: AccountId,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            account_id: claims.sub,
        }
    }
}

/// Rejects the request unless it carries a valid access token
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(request.headers())?
        .ok_or_else(|| ApiError::unauthorized("Authentication credentials were not provided."))?;

    let auth_user = validate_jwt(&state, &token)?;
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Attaches `AuthUser` when a token is present. No header means anonymous;
/// a header that is present but wrong is still a 401.
pub async fn optional_jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(token) = extract_jwt_from_headers(request.headers())? {
        let auth_user = validate_jwt(&state, &token)?;
        request.extensions_mut().insert(auth_user);
    }

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header. An absent or blank header yields `None`.
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<Option<String>, ApiError> {
    let Some(auth_header) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header format"))?
        .trim();

    if auth_str.is_empty() {
        return Ok(None);
    }

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(Some(token.trim().to_string())),
        Some(_) => Err(ApiError::unauthorized("Empty JWT token")),
        None => Err(ApiError::unauthorized(
            "Authorization header must use Bearer token format",
        )),
    }
}

fn validate_jwt(state: &AppState, token: &str) -> Result<AuthUser, ApiError> {
    match state.tokens().verify(token, TokenKind::Access) {
        Ok(claims) => Ok(AuthUser::from(claims)),
        Err(TokenError::Expired) => Err(ApiError::unauthorized("Token has expired.")),
        Err(e) => {
            tracing::debug!("Rejected access token: {}", e);
            Err(ApiError::unauthorized("Token is invalid."))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn auth_user_takes_the_subject() {
        let account_id = uuid::Uuid::new_v4();
        let claims = Claims {
            sub: account_id,
            email: "writer@example.com".to_string(),
            kind: TokenKind::Access,
            jti: uuid::Uuid::new_v4(),
            exp: 0,
            iat: 0,
        };
        assert_eq!(AuthUser::from(claims).account_id, account_id);
    }

    #[test]
    fn missing_or_blank_header_is_anonymous() {
        assert!(extract_jwt_from_headers(&HeaderMap::new()).unwrap().is_none());
        assert!(extract_jwt_from_headers(&headers("")).unwrap().is_none());
    }

    #[test]
    fn bearer_token_is_extracted() {
        assert_eq!(
            extract_jwt_from_headers(&headers("Bearer abc.def.ghi")).unwrap().as_deref(),
            Some("abc.def.ghi")
        );
    }

    #[test]
    fn other_schemes_are_rejected() {
        assert!(extract_jwt_from_headers(&headers("Basic dXNlcjpwdw==")).is_err());
        assert!(extract_jwt_from_headers(&headers("Bearer    ")).is_err());
    }
}
