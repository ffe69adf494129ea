//! Durable Key-Value Storage Abstraction
//!
//! Models the client-side storage the original web client keeps its session
//! in: a flat namespace of named string entries. Hosts back it with whatever
//! fits the platform (SQLite on desktop, preferences stores on mobile,
//! localStorage on the web).

use async_trait::async_trait;

use crate::error::Result;

/// String-keyed durable storage trait
///
/// The auth core persists exactly three entries through this trait: the
/// access token, the refresh token, and the serialized user record. All
/// three are invalidated together on logout or unrecoverable refresh
/// failure.
///
/// # Security
///
/// Stored values include bearer credentials. Implementations must never log
/// values, and should prefer platform-protected storage where available.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::storage::KeyValueStore;
///
/// async fn remember(store: &dyn KeyValueStore, token: &str) -> Result<()> {
///     store.set("accessToken", token).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Store a value under the given key, overwriting any previous value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Retrieve a value
    ///
    /// Returns `Ok(None)` if the key doesn't exist.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Remove a key
    ///
    /// Idempotent: succeeds even if the key doesn't exist.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Check if a key exists without retrieving it
    async fn has_key(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// List all stored keys (without values)
    async fn list_keys(&self) -> Result<Vec<String>>;

    /// Remove all entries
    async fn clear_all(&self) -> Result<()>;
}
