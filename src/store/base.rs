use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use super::sqlite_store::SqliteStore;
use crate::config::StoreConfig;
use crate::models::{CreateTask, Task, User};

/// Persistence-layer failure. Underlying driver detail is kept for the
/// logs; clients only ever see an opaque 500.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

/// Input for inserting a user record. The password arrives already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// The Store trait abstracts user and task persistence.
///
/// Task operations are owner-scoped: every lookup or mutation takes the
/// owner id and only touches rows belonging to that owner.
#[async_trait]
pub trait Store: Send + Sync {
    /// Find a user whose username or email matches, for conflict checks.
    async fn find_user_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, StoreError>;

    /// Find a user by email, for login.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Insert a new user and return the stored record.
    async fn insert_user(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// All tasks owned by `owner_id`, newest first.
    async fn list_tasks(&self, owner_id: i64) -> Result<Vec<Task>, StoreError>;

    /// Insert a task owned by `owner_id` and return the stored record.
    async fn insert_task(&self, owner_id: i64, task: CreateTask) -> Result<Task, StoreError>;

    /// Find a task by id, only if owned by `owner_id`.
    async fn find_task(&self, id: i64, owner_id: i64) -> Result<Option<Task>, StoreError>;

    /// Persist an already-patched task row, matching on (id, owner).
    /// Returns the updated record, or None if the row disappeared between
    /// lookup and write.
    async fn update_task(&self, task: &Task) -> Result<Option<Task>, StoreError>;

    /// Delete a task by (id, owner). Returns whether a row was removed.
    async fn delete_task(&self, id: i64, owner_id: i64) -> Result<bool, StoreError>;
}

/// Creates a concrete store implementation based on the StoreConfig.
pub async fn create_store(config: &StoreConfig) -> Arc<dyn Store> {
    match config {
        StoreConfig::Sqlite(sqlite_config) => match SqliteStore::new(sqlite_config).await {
            Ok(store) => {
                info!("Successfully created SQLite store.");
                Arc::new(store)
            }
            Err(e) => {
                error!("Failed to create SQLite store: {}", e);
                std::process::exit(1);
            }
        },
    }
}

/// A patch applied to a task before persisting. Used by the update handler;
/// lives here so backends and handlers agree on patch semantics.
pub fn apply_patch(task: &mut Task, patch: crate::models::UpdateTask) {
    if let Some(title) = patch.title {
        task.title = title;
    }
    if let Some(description) = patch.description {
        task.description = Some(description);
    }
    if let Some(priority) = patch.priority {
        task.priority = priority;
    }
    if let Some(status) = patch.status {
        task.status = status;
    }
    if let Some(due_date) = patch.due_date {
        task.due_date = Some(due_date);
    }
}
