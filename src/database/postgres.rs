use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Account, AccountId, Entry, EntryChanges, EntryId, NewAccount, NewEntry};
use crate::database::repository::{AccountStore, EntryStore};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS accounts (
        id UUID PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS entries (
        id BIGSERIAL PRIMARY KEY,
        owner_id UUID NOT NULL REFERENCES accounts (id) ON DELETE CASCADE,
        title VARCHAR(255) NOT NULL,
        content TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL,
        modified_at TIMESTAMPTZ NOT NULL,
        feedback TEXT
    )
    "#,
    "CREATE INDEX IF NOT EXISTS entries_owner_created_idx ON entries (owner_id, created_at DESC)",
];

const ENTRY_COLUMNS: &str = "id, owner_id, title, content, created_at, modified_at, feedback";

/// PostgreSQL-backed account and entry store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the two tables if they are not there yet
    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        for statement in SCHEMA {
            sqlx::query(*statement).execute(&self.pool).await?;
        }
        info!("Database schema ready");
        Ok(())
    }
}

#[async_trait]
impl EntryStore for PgStore {
    async fn insert_entry(&self, entry: NewEntry) -> Result<Entry, DatabaseError> {
        let sql = format!(
            "INSERT INTO entries (owner_id, title, content, created_at, modified_at) \
             VALUES ($1, $2, $3, $4, $4) RETURNING {ENTRY_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Entry>(&sql)
            .bind(entry.owner_id)
            .bind(&entry.title)
            .bind(&entry.content)
            .bind(entry.created_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_entries(&self, owner: AccountId) -> Result<Vec<Entry>, DatabaseError> {
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM entries WHERE owner_id = $1 ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, Entry>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_entry(&self, owner: AccountId, id: EntryId) -> Result<Option<Entry>, DatabaseError> {
        let sql = format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE id = $1 AND owner_id = $2");
        let row = sqlx::query_as::<_, Entry>(&sql)
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_entry(
        &self,
        owner: AccountId,
        id: EntryId,
        changes: EntryChanges,
        modified_at: DateTime<Utc>,
    ) -> Result<Option<Entry>, DatabaseError> {
        let sql = format!(
            "UPDATE entries SET title = COALESCE($3, title), content = COALESCE($4, content), modified_at = $5 \
             WHERE id = $1 AND owner_id = $2 RETURNING {ENTRY_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Entry>(&sql)
            .bind(id)
            .bind(owner)
            .bind(changes.title)
            .bind(changes.content)
            .bind(modified_at)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn set_feedback(
        &self,
        owner: AccountId,
        id: EntryId,
        feedback: String,
        modified_at: DateTime<Utc>,
    ) -> Result<Option<Entry>, DatabaseError> {
        let sql = format!(
            "UPDATE entries SET feedback = $3, modified_at = $4 \
             WHERE id = $1 AND owner_id = $2 RETURNING {ENTRY_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Entry>(&sql)
            .bind(id)
            .bind(owner)
            .bind(feedback)
            .bind(modified_at)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_entry(&self, owner: AccountId, id: EntryId) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}

#[async_trait]
impl AccountStore for PgStore {
    async fn insert_account(&self, account: NewAccount) -> Result<Account, DatabaseError> {
        let result = sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (id, email, password_hash, created_at) VALUES ($1, $2, $3, $4) \
             RETURNING id, email, password_hash, created_at",
        )
        .bind(account.id)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.created_at)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(DatabaseError::Duplicate("email"))
            }
            Err(other) => Err(other.into()),
        }
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, DatabaseError> {
        let row = sqlx::query_as::<_, Account>(
            "SELECT id, email, password_hash, created_at FROM accounts WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, DatabaseError> {
        let row = sqlx::query_as::<_, Account>(
            "SELECT id, email, password_hash, created_at FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
