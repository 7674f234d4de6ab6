use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::account::AccountId;

pub type EntryId = i64;

/// A single reflection written by its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    #[serde(skip_serializing)]
    pub owner_id: AccountId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub feedback: Option<String>,
}

/// Insert payload. `created_at` is written to both timestamp columns.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub owner_id: AccountId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Externally mutable fields. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl EntryChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}
