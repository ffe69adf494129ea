//! Key-Value Storage using SQLite

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    storage::KeyValueStore,
};
use sqlx::{sqlite::SqlitePool, Row};
use std::path::PathBuf;
use tracing::debug;

/// SQLite-backed key-value store implementation
///
/// Persists the client session entries (tokens, cached user) in a single
/// SQLite table. Values are never logged.
pub struct SqliteKeyValueStore {
    pool: SqlitePool,
}

impl SqliteKeyValueStore {
    /// Create a new store with the given database path
    pub async fn new(db_path: PathBuf) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(BridgeError::Io)?;
        }

        // Convert path to string, replacing backslashes with forward slashes for SQLite URL
        let path_str = db_path.to_string_lossy().replace('\\', "/");
        let db_url = format!("sqlite://{}?mode=rwc", path_str);

        let pool = SqlitePool::connect(&db_url)
            .await
            .map_err(|e| BridgeError::StorageError(format!("Failed to connect to DB: {}", e)))?;

        Self::init_schema(&pool).await?;

        debug!(path = ?db_path, "Initialized key-value store");

        Ok(Self { pool })
    }

    /// Create an in-memory store (for testing)
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .map_err(|e| BridgeError::StorageError(format!("Failed to connect to DB: {}", e)))?;

        Self::init_schema(&pool).await?;

        Ok(Self { pool })
    }

    async fn init_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS client_storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await
        .map_err(|e| BridgeError::StorageError(format!("Failed to create table: {}", e)))?;

        Ok(())
    }

    /// Get the current Unix timestamp
    fn now() -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO client_storage (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Self::now())
        .execute(&self.pool)
        .await
        .map_err(|e| BridgeError::StorageError(format!("Failed to set entry: {}", e)))?;

        debug!(key = key, "Stored entry");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM client_storage WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| BridgeError::StorageError(format!("Failed to get entry: {}", e)))?;

        Ok(row.map(|row| row.get(0)))
    }

    async fn remove(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM client_storage WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| BridgeError::StorageError(format!("Failed to remove entry: {}", e)))?;

        debug!(key = key, "Removed entry");
        Ok(())
    }

    async fn has_key(&self, key: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM client_storage WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| BridgeError::StorageError(format!("Failed to check key: {}", e)))?;

        Ok(row.is_some())
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT key FROM client_storage ORDER BY key")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| BridgeError::StorageError(format!("Failed to list keys: {}", e)))?;

        let keys = rows.into_iter().map(|row| row.get(0)).collect();
        Ok(keys)
    }

    async fn clear_all(&self) -> Result<()> {
        sqlx::query("DELETE FROM client_storage")
            .execute(&self.pool)
            .await
            .map_err(|e| BridgeError::StorageError(format!("Failed to clear storage: {}", e)))?;

        debug!("Cleared all entries");
        Ok(())
    }
}
