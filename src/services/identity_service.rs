use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use super::{ServiceError, ServiceResult};
use crate::auth::password::{hash_password_blocking, verify_dummy_blocking, verify_password_blocking};
use crate::auth::{TokenError, TokenIssuer, TokenKind, TokenPair};
use crate::database::models::{Account, AccountId, NewAccount};
use crate::database::{AccountStore, DatabaseError};

/// Shared by unknown-email and wrong-password failures
pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";

/// Registration, sign-in and token renewal
#[derive(Clone)]
pub struct IdentityService {
    accounts: Arc<dyn AccountStore>,
    tokens: Arc<TokenIssuer>,
}

impl IdentityService {
    pub fn new(accounts: Arc<dyn AccountStore>, tokens: Arc<TokenIssuer>) -> Self {
        Self { accounts, tokens }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    pub async fn register(&self, email: &str, password: &str) -> ServiceResult<Account> {
        let email = email.trim();
        validate_email_format(email).map_err(|msg| ServiceError::field("email", msg))?;
        if password.is_empty() {
            return Err(ServiceError::field("password", "This field may not be blank."));
        }

        if self.accounts.find_account_by_email(email).await?.is_some() {
            return Err(ServiceError::Conflict("User with this email already exists.".to_string()));
        }

        let password_hash = hash_password_blocking(password.to_string()).await?;
        let account = self
            .accounts
            .insert_account(NewAccount {
                id: Uuid::new_v4(),
                email: email.to_string(),
                password_hash,
                created_at: Utc::now(),
            })
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent signup for the same address
                DatabaseError::Duplicate(_) => {
                    ServiceError::Conflict("User with this email already exists.".to_string())
                }
                other => other.into(),
            })?;

        info!("Registered account {}", account.id);
        Ok(account)
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> ServiceResult<TokenPair> {
        let Some(account) = self.accounts.find_account_by_email(email.trim()).await? else {
            verify_dummy_blocking(password.to_string()).await?;
            warn!("Sign-in failed: unknown email");
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        let matches = verify_password_blocking(password.to_string(), account.password_hash.clone()).await?;
        if !matches {
            warn!("Sign-in failed: bad password for account {}", account.id);
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        info!("Account {} signed in", account.id);
        Ok(self.tokens.issue_pair(&account)?)
    }

    /// Trade a refresh token for a fresh access token
    pub async fn refresh(&self, refresh_token: &str) -> ServiceResult<String> {
        let claims = self
            .tokens
            .verify(refresh_token, TokenKind::Refresh)
            .map_err(unauthorized)?;

        let account = self
            .accounts
            .find_account(claims.sub)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized("Account no longer exists.".to_string()))?;

        Ok(self.tokens.issue(account.id, &account.email, TokenKind::Access)?)
    }

    pub async fn whoami(&self, account_id: AccountId) -> ServiceResult<Account> {
        self.accounts
            .find_account(account_id)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized("Account no longer exists.".to_string()))
    }
}

fn unauthorized(err: TokenError) -> ServiceError {
    match err {
        TokenError::Expired => ServiceError::Unauthorized("Token has expired.".to_string()),
        _ => ServiceError::Unauthorized("Token is invalid.".to_string()),
    }
}

/// Basic `local@domain.tld` shape check
pub fn validate_email_format(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("This field may not be blank.".to_string());
    }
    if email.chars().any(char::is_whitespace) {
        return Err("Enter a valid email address.".to_string());
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err("Enter a valid email address.".to_string());
    };
    if local.is_empty() || domain.contains('@') {
        return Err("Enter a valid email address.".to_string());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err("Enter a valid email address.".to_string());
    }

    Ok(())
}
