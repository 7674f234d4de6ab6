pub mod entry_service;
pub mod identity_service;

pub use entry_service::EntryService;
pub use identity_service::IdentityService;

use thiserror::Error;

use crate::auth::password::PasswordError;
use crate::auth::TokenError;
use crate::database::DatabaseError;

/// Failures surfaced by the entry and identity services
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{message}")]
    Validation {
        message: String,
        field: Option<&'static str>,
    },

    /// Missing, or owned by another account. The two are never distinguished.
    #[error("Not found.")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation {
            message: message.into(),
            field: None,
        }
    }

    pub fn field(field: &'static str, message: impl Into<String>) -> Self {
        ServiceError::Validation {
            message: message.into(),
            field: Some(field),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
