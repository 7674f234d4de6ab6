use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use super::{ServiceError, ServiceResult};
use crate::database::models::{AccountId, Entry, EntryChanges, EntryId, NewEntry};
use crate::database::EntryStore;

/// Longest accepted title, counted in characters
pub const TITLE_MAX_CHARS: usize = 255;

/// Entry use-cases. Every call takes the acting account explicitly and only
/// ever touches that account's rows.
#[derive(Clone)]
pub struct EntryService {
    store: Arc<dyn EntryStore>,
}

impl EntryService {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, owner: AccountId, title: String, content: String) -> ServiceResult<Entry> {
        validate_title(&title)?;
        validate_content(&content)?;

        let entry = self
            .store
            .insert_entry(NewEntry {
                owner_id: owner,
                title,
                content,
                created_at: Utc::now(),
            })
            .await?;

        debug!("Entry {} created for account {}", entry.id, owner);
        Ok(entry)
    }

    pub async fn list(&self, owner: AccountId) -> ServiceResult<Vec<Entry>> {
        Ok(self.store.list_entries(owner).await?)
    }

    pub async fn get(&self, owner: AccountId, id: EntryId) -> ServiceResult<Entry> {
        self.store
            .find_entry(owner, id)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    /// Apply title/content changes. At least one field must be present.
    pub async fn update(&self, owner: AccountId, id: EntryId, changes: EntryChanges) -> ServiceResult<Entry> {
        if changes.is_empty() {
            return Err(ServiceError::validation("Provide a title or content to update."));
        }
        if let Some(title) = &changes.title {
            validate_title(title)?;
        }
        if let Some(content) = &changes.content {
            validate_content(content)?;
        }

        self.store
            .update_entry(owner, id, changes, Utc::now())
            .await?
            .ok_or(ServiceError::NotFound)
    }

    pub async fn delete(&self, owner: AccountId, id: EntryId) -> ServiceResult<()> {
        if self.store.delete_entry(owner, id).await? {
            debug!("Entry {} deleted by account {}", id, owner);
            Ok(())
        } else {
            Err(ServiceError::NotFound)
        }
    }

    /// The only write path for `feedback`.
    pub async fn attach_feedback(&self, owner: AccountId, id: EntryId, feedback: String) -> ServiceResult<Entry> {
        self.store
            .set_feedback(owner, id, feedback, Utc::now())
            .await?
            .ok_or(ServiceError::NotFound)
    }

    pub async fn health_check(&self) -> ServiceResult<()> {
        Ok(self.store.health_check().await?)
    }
}

fn validate_title(title: &str) -> ServiceResult<()> {
    if title.trim().is_empty() {
        return Err(ServiceError::field("title", "This field may not be blank."));
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(ServiceError::field(
            "title",
            format!("Ensure this field has no more than {TITLE_MAX_CHARS} characters."),
        ));
    }
    Ok(())
}

fn validate_content(content: &str) -> ServiceResult<()> {
    if content.trim().is_empty() {
        return Err(ServiceError::field("content", "This field may not be blank."));
    }
    Ok(())
}
