pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::database::models::{Account, AccountId};

/// Which half of a token pair a JWT is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: AccountId,
    pub email: String,
    pub kind: TokenKind,
    pub jti: Uuid,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT secret not configured")]
    InvalidSecret,
    #[error("JWT generation error: {0}")]
    Generation(String),
    #[error("Token has expired")]
    Expired,
    #[error("Token is not a {0:?} token")]
    WrongKind(TokenKind),
    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// Signs and verifies the access/refresh pair handed out at sign-in.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, access_ttl: Duration, refresh_ttl: Duration) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::InvalidSecret);
        }
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl,
            refresh_ttl,
        })
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, TokenError> {
        Self::new(
            &security.jwt_secret,
            Duration::minutes(security.access_token_minutes as i64),
            Duration::days(security.refresh_token_days as i64),
        )
    }

    /// Access token lifetime in seconds, reported to clients
    pub fn access_ttl_secs(&self) -> i64 {
        self.access_ttl.num_seconds()
    }

    pub fn issue_pair(&self, account: &Account) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue(account.id, &account.email, TokenKind::Access)?,
            refresh_token: self.issue(account.id, &account.email, TokenKind::Refresh)?,
        })
    }

    pub fn issue(&self, account_id: AccountId, email: &str, kind: TokenKind) -> Result<String, TokenError> {
        let now = Utc::now();
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let claims = Claims {
            sub: account_id,
            email: email.to_string(),
            kind,
            jti: Uuid::new_v4(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }

    /// Check signature, expiry and kind; return the claims
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, TokenError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(e.to_string()),
        })?;

        if data.claims.kind != expected {
            return Err(TokenError::WrongKind(expected));
        }
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account {
            id: Uuid::new_v4(),
            email: "writer@example.com".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret", Duration::minutes(5), Duration::days(1)).unwrap()
    }

    #[test]
    fn pair_round_trips_with_kinds() {
        let issuer = issuer();
        let account = account();
        let pair = issuer.issue_pair(&account).unwrap();

        let access = issuer.verify(&pair.access_token, TokenKind::Access).unwrap();
        assert_eq!(access.sub, account.id);
        assert_eq!(access.email, account.email);

        let refresh = issuer.verify(&pair.refresh_token, TokenKind::Refresh).unwrap();
        assert!(refresh.exp > access.exp);
    }

    #[test]
    fn kinds_are_not_interchangeable() {
        let issuer = issuer();
        let pair = issuer.issue_pair(&account()).unwrap();
        assert!(matches!(
            issuer.verify(&pair.access_token, TokenKind::Refresh),
            Err(TokenError::WrongKind(TokenKind::Refresh))
        ));
        assert!(matches!(
            issuer.verify(&pair.refresh_token, TokenKind::Access),
            Err(TokenError::WrongKind(TokenKind::Access))
        ));
    }

    #[test]
    fn rejects_other_secret_and_garbage() {
        let other = TokenIssuer::new("other-secret", Duration::minutes(5), Duration::days(1)).unwrap();
        let token = other.issue(Uuid::new_v4(), "x@example.com", TokenKind::Access).unwrap();
        assert!(matches!(issuer().verify(&token, TokenKind::Access), Err(TokenError::Invalid(_))));
        assert!(matches!(issuer().verify("not.a.jwt", TokenKind::Access), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn expired_tokens_are_reported() {
        // Well past the default 60s validation leeway
        let stale = TokenIssuer::new("test-secret", Duration::minutes(-10), Duration::days(1)).unwrap();
        let token = stale.issue(Uuid::new_v4(), "x@example.com", TokenKind::Access).unwrap();
        assert!(matches!(issuer().verify(&token, TokenKind::Access), Err(TokenError::Expired)));
    }

    #[test]
    fn empty_secret_is_refused() {
        assert!(matches!(
            TokenIssuer::new("", Duration::minutes(5), Duration::days(1)),
            Err(TokenError::InvalidSecret)
        ));
    }
}
