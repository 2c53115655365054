use async_trait::async_trait;
use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::models::{CreateTask, Task, User};
use crate::store::{NewUser, Store, StoreError};

/// The config struct for SQLite connections.
#[derive(Deserialize, Serialize, JsonSchema, Debug)]
pub struct SqliteConfig {
    /// Connection string, e.g. "sqlite://taskotron.db" or "sqlite::memory:".
    pub uri: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

/// A concrete `Store` implementation backed by SQLite through sqlx.
///
/// Connections are pooled; each query acquires one for its duration and
/// releases it when the future completes.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Creates a new `SqliteStore` from the given config, ensuring the
    /// schema exists.
    pub async fn new(config: &SqliteConfig) -> Result<Self, StoreError> {
        info!("Connecting to SQLite at: {}", config.uri);

        let options: SqliteConnectOptions = config
            .uri
            .parse::<SqliteConnectOptions>()
            .map_err(|e| StoreError::Database(format!("invalid SQLite URI: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.ensure_schema().await?;

        info!("SQLite connection established successfully.");
        Ok(store)
    }

    /// Creates the users and tasks tables if they are not present yet.
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                username      TEXT NOT NULL UNIQUE,
                email         TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at    TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tasks (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id     INTEGER NOT NULL REFERENCES users(id),
                title       TEXT NOT NULL,
                description TEXT,
                priority    TEXT NOT NULL,
                status      TEXT NOT NULL,
                due_date    TEXT,
                created_at  TEXT NOT NULL,
                updated_at  TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_tasks_user_id ON tasks(user_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn find_user_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE username = ? OR email = ? LIMIT 1",
        )
        .bind(username)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ? LIMIT 1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn insert_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn list_tasks(&self, owner_id: i64) -> Result<Vec<Task>, StoreError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE user_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    async fn insert_task(&self, owner_id: i64, task: CreateTask) -> Result<Task, StoreError> {
        let now = Utc::now();
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, title, description, priority, status, due_date, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.priority)
        .bind(task.status)
        .bind(task.due_date)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(task)
    }

    async fn find_task(&self, id: i64, owner_id: i64) -> Result<Option<Task>, StoreError> {
        let task =
            sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = ? AND user_id = ? LIMIT 1")
                .bind(id)
                .bind(owner_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(task)
    }

    async fn update_task(&self, task: &Task) -> Result<Option<Task>, StoreError> {
        let updated = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = ?, description = ?, priority = ?, status = ?, due_date = ?, updated_at = ?
            WHERE id = ? AND user_id = ?
            RETURNING *
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.priority)
        .bind(task.status)
        .bind(task.due_date)
        .bind(Utc::now())
        .bind(task.id)
        .bind(task.user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete_task(&self, id: i64, owner_id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
