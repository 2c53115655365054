use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::store::sqlite_store::SqliteConfig;

/// Store configuration. The backend is selected by a "type" tag so that
/// further backends can be added alongside SQLite.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
#[serde(tag = "type")]
pub enum StoreConfig {
    #[serde(rename = "sqlite")]
    Sqlite(SqliteConfig),
    // Add more variants here as needed, like:
    // #[serde(rename = "postgres")]
    // Postgres(PostgresConfig),
}
