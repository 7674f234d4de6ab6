use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{Account, AccountId, Entry, EntryChanges, EntryId, NewAccount, NewEntry};
use crate::database::repository::{AccountStore, EntryStore};

#[derive(Default)]
struct Tables {
    accounts: HashMap<AccountId, Account>,
    entries: BTreeMap<EntryId, Entry>,
    last_entry_id: EntryId,
}

impl Tables {
    fn owned_mut(&mut self, owner: AccountId, id: EntryId) -> Option<&mut Entry> {
        self.entries.get_mut(&id).filter(|entry| entry.owner_id == owner)
    }
}

/// Process-local store used when no database is configured, and by tests.
/// Data does not survive a restart.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn insert_entry(&self, entry: NewEntry) -> Result<Entry, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.last_entry_id += 1;
        let row = Entry {
            id: tables.last_entry_id,
            owner_id: entry.owner_id,
            title: entry.title,
            content: entry.content,
            created_at: entry.created_at,
            modified_at: entry.created_at,
            feedback: None,
        };
        tables.entries.insert(row.id, row.clone());
        Ok(row)
    }

    async fn list_entries(&self, owner: AccountId) -> Result<Vec<Entry>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Entry> = tables
            .entries
            .values()
            .filter(|entry| entry.owner_id == owner)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn find_entry(&self, owner: AccountId, id: EntryId) -> Result<Option<Entry>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .entries
            .get(&id)
            .filter(|entry| entry.owner_id == owner)
            .cloned())
    }

    async fn update_entry(
        &self,
        owner: AccountId,
        id: EntryId,
        changes: EntryChanges,
        modified_at: DateTime<Utc>,
    ) -> Result<Option<Entry>, DatabaseError> {
        let mut tables = self.tables.write().await;
        let Some(entry) = tables.owned_mut(owner, id) else {
            return Ok(None);
        };
        if let Some(title) = changes.title {
            entry.title = title;
        }
        if let Some(content) = changes.content {
            entry.content = content;
        }
        entry.modified_at = modified_at;
        Ok(Some(entry.clone()))
    }

    async fn set_feedback(
        &self,
        owner: AccountId,
        id: EntryId,
        feedback: String,
        modified_at: DateTime<Utc>,
    ) -> Result<Option<Entry>, DatabaseError> {
        let mut tables = self.tables.write().await;
        let Some(entry) = tables.owned_mut(owner, id) else {
            return Ok(None);
        };
        entry.feedback = Some(feedback);
        entry.modified_at = modified_at;
        Ok(Some(entry.clone()))
    }

    async fn delete_entry(&self, owner: AccountId, id: EntryId) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.owned_mut(owner, id).is_none() {
            return Ok(false);
        }
        Ok(tables.entries.remove(&id).is_some())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn insert_account(&self, account: NewAccount) -> Result<Account, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.accounts.values().any(|existing| existing.email == account.email) {
            return Err(DatabaseError::Duplicate("email"));
        }
        let row = Account::from(account);
        tables.accounts.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .accounts
            .values()
            .find(|account| account.email == email)
            .cloned())
    }

    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.accounts.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn new_entry(owner: AccountId, title: &str, created_at: DateTime<Utc>) -> NewEntry {
        NewEntry {
            owner_id: owner,
            title: title.to_string(),
            content: "body".to_string(),
            created_at,
        }
    }

    #[tokio::test]
    async fn lists_newest_first_per_owner() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let t0 = Utc::now();

        store.insert_entry(new_entry(alice, "old", t0)).await.unwrap();
        store.insert_entry(new_entry(bob, "bob", t0 + Duration::seconds(1))).await.unwrap();
        store.insert_entry(new_entry(alice, "new", t0 + Duration::seconds(2))).await.unwrap();
        // Same timestamp as "old": the later id sorts first
        store.insert_entry(new_entry(alice, "tie", t0)).await.unwrap();

        let titles: Vec<String> = store
            .list_entries(alice)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["new", "tie", "old"]);
    }

    #[tokio::test]
    async fn foreign_rows_look_missing() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let mallory = Uuid::new_v4();
        let entry = store.insert_entry(new_entry(alice, "mine", Utc::now())).await.unwrap();

        assert!(store.find_entry(mallory, entry.id).await.unwrap().is_none());
        assert!(store
            .update_entry(mallory, entry.id, EntryChanges::default(), Utc::now())
            .await
            .unwrap()
            .is_none());
        assert!(store
            .set_feedback(mallory, entry.id, "x".into(), Utc::now())
            .await
            .unwrap()
            .is_none());
        assert!(!store.delete_entry(mallory, entry.id).await.unwrap());

        // Still intact for the owner
        let found = store.find_entry(alice, entry.id).await.unwrap().unwrap();
        assert_eq!(found, entry);
    }

    #[tokio::test]
    async fn insert_sets_both_timestamps() {
        let store = MemoryStore::new();
        let at = Utc::now();
        let entry = store.insert_entry(new_entry(Uuid::new_v4(), "t", at)).await.unwrap();
        assert_eq!(entry.created_at, at);
        assert_eq!(entry.modified_at, at);
        assert!(entry.feedback.is_none());
    }

    #[tokio::test]
    async fn rejects_duplicate_email() {
        let store = MemoryStore::new();
        let account = |email: &str| NewAccount {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            created_at: Utc::now(),
        };
        store.insert_account(account("a@example.com")).await.unwrap();
        assert!(matches!(
            store.insert_account(account("a@example.com")).await,
            Err(DatabaseError::Duplicate("email"))
        ));
        assert!(store.find_account_by_email("a@example.com").await.unwrap().is_some());
        assert!(store.find_account_by_email("b@example.com").await.unwrap().is_none());
    }
}
