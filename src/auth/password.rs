use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use once_cell::sync::Lazy;
use thiserror::Error;

/// Hash checked when the account is unknown, so a failed sign-in costs the same either way
static DUMMY_HASH: Lazy<Option<String>> = Lazy::new(|| hash_password("daily-bright-dummy-password").ok());

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hash(String),
    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
    #[error("Password worker failed: {0}")]
    Worker(String),
}

/// Hash a password into an argon2id PHC string
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Check a password against a stored PHC string. A mismatch is `Ok(false)`.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Hash(e.to_string())),
    }
}

/// `hash_password` off the async executor
pub async fn hash_password_blocking(password: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| PasswordError::Worker(e.to_string()))?
}

/// `verify_password` off the async executor
pub async fn verify_password_blocking(password: String, hash: String) -> Result<bool, PasswordError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| PasswordError::Worker(e.to_string()))?
}

/// Spend one argon2 verification on a throwaway hash. Always reports a mismatch.
pub async fn verify_dummy_blocking(password: String) -> Result<bool, PasswordError> {
    tokio::task::spawn_blocking(move || -> Result<bool, PasswordError> {
        if let Some(hash) = DUMMY_HASH.as_deref() {
            verify_password(&password, hash)?;
        }
        Ok(false)
    })
    .await
    .map_err(|e| PasswordError::Worker(e.to_string()))?
}
