use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::database::manager::DatabaseError;
use crate::database::models::{Account, AccountId, Entry, EntryChanges, EntryId, NewAccount, NewEntry};

/// Persistence for reflection entries.
///
/// Every lookup and mutation is keyed by `(owner, id)`. A row owned by someone
/// else is reported exactly like a missing row (`None` / `false`), so callers
/// cannot probe for other accounts' entries.
#[async_trait]
pub trait EntryStore: Send + Sync {
    async fn insert_entry(&self, entry: NewEntry) -> Result<Entry, DatabaseError>;

    /// Owner's entries, newest first (`created_at DESC, id DESC`).
    async fn list_entries(&self, owner: AccountId) -> Result<Vec<Entry>, DatabaseError>;

    async fn find_entry(&self, owner: AccountId, id: EntryId) -> Result<Option<Entry>, DatabaseError>;

    async fn update_entry(
        &self,
        owner: AccountId,
        id: EntryId,
        changes: EntryChanges,
        modified_at: DateTime<Utc>,
    ) -> Result<Option<Entry>, DatabaseError>;

    async fn set_feedback(
        &self,
        owner: AccountId,
        id: EntryId,
        feedback: String,
        modified_at: DateTime<Utc>,
    ) -> Result<Option<Entry>, DatabaseError>;

    /// Returns whether a row was removed.
    async fn delete_entry(&self, owner: AccountId, id: EntryId) -> Result<bool, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}

/// Persistence for accounts, unique by email.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Fails with `DatabaseError::Duplicate("email")` when the email is taken.
    async fn insert_account(&self, account: NewAccount) -> Result<Account, DatabaseError>;

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, DatabaseError>;

    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, DatabaseError>;
}
