//! Credential Vault
//!
//! Write-through persistence for the token pair and the cached user record.
//! Every write lands in the host's [`KeyValueStore`] under fixed keys and is
//! mirrored in memory so the gateway can read the current access token
//! synchronously on every dispatch.
//!
//! Token values are never logged and never appear in error messages.

use crate::error::{AuthError, Result};
use crate::types::{TokenPair, User};
use bridge_traits::storage::KeyValueStore;
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

/// Storage key for the access token
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Storage key for the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
/// Storage key for the serialized user record
pub const USER_KEY: &str = "user";

/// Durable credential storage with a synchronous in-memory mirror.
pub struct CredentialVault {
    store: Arc<dyn KeyValueStore>,
    access_token: RwLock<Option<String>>,
    refresh_token: RwLock<Option<String>>,
    user: RwLock<Option<User>>,
}

fn read_slot<T: Clone>(slot: &RwLock<Option<T>>) -> Option<T> {
    match slot.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

fn write_slot<T>(slot: &RwLock<Option<T>>, value: Option<T>) {
    match slot.write() {
        Ok(mut guard) => *guard = value,
        Err(poisoned) => *poisoned.into_inner() = value,
    }
}

impl CredentialVault {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            access_token: RwLock::new(None),
            refresh_token: RwLock::new(None),
            user: RwLock::new(None),
        }
    }

    /// Rehydrate the in-memory mirror from persisted storage.
    ///
    /// A corrupted persisted user record is deleted and treated as absent;
    /// it will be refetched from the backend. Token entries are opaque
    /// strings and load as-is.
    pub async fn load(&self) -> Result<()> {
        let access = self.get_entry(ACCESS_TOKEN_KEY).await?;
        let refresh = self.get_entry(REFRESH_TOKEN_KEY).await?;

        let user = match self.get_entry(USER_KEY).await? {
            Some(json) => match serde_json::from_str::<User>(&json) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "Persisted user record is corrupted, discarding");
                    if let Err(delete_err) = self.store.remove(USER_KEY).await {
                        warn!(error = %delete_err, "Failed to delete corrupted user record");
                    }
                    None
                }
            },
            None => None,
        };

        debug!(
            has_access_token = access.is_some(),
            has_refresh_token = refresh.is_some(),
            has_user = user.is_some(),
            "Credential vault loaded"
        );

        write_slot(&self.access_token, access);
        write_slot(&self.refresh_token, refresh);
        write_slot(&self.user, user);

        Ok(())
    }

    /// Persist a token pair and update the mirror.
    ///
    /// Both tokens are written before the mirror changes, so a storage
    /// failure leaves the previous credentials intact.
    pub async fn store_tokens(&self, tokens: &TokenPair) -> Result<()> {
        self.set_entry(ACCESS_TOKEN_KEY, &tokens.access_token)
            .await?;
        self.set_entry(REFRESH_TOKEN_KEY, &tokens.refresh_token)
            .await?;

        write_slot(&self.access_token, Some(tokens.access_token.clone()));
        write_slot(&self.refresh_token, Some(tokens.refresh_token.clone()));

        info!("Token pair stored");
        Ok(())
    }

    /// Persist the user record and update the mirror.
    pub async fn store_user(&self, user: &User) -> Result<()> {
        let json = serde_json::to_string(user)
            .map_err(|e| AuthError::Decode(format!("user serialization failed: {}", e)))?;
        self.set_entry(USER_KEY, &json).await?;

        write_slot(&self.user, Some(user.clone()));

        debug!(user_id = %user.id, "User record stored");
        Ok(())
    }

    /// Current access token, if any (synchronous mirror read).
    pub fn access_token(&self) -> Option<String> {
        read_slot(&self.access_token)
    }

    /// Current refresh token, if any (synchronous mirror read).
    pub fn refresh_token(&self) -> Option<String> {
        read_slot(&self.refresh_token)
    }

    /// Cached user record, if any (synchronous mirror read).
    pub fn cached_user(&self) -> Option<User> {
        read_slot(&self.user)
    }

    /// Clear all credentials.
    ///
    /// The in-memory mirror is always emptied. Persisted entries are removed
    /// per key, best effort, so local sign-out succeeds even when the store
    /// is degraded.
    pub async fn clear(&self) {
        write_slot(&self.access_token, None);
        write_slot(&self.refresh_token, None);
        write_slot(&self.user, None);

        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.store.remove(key).await {
                warn!(key = key, error = %e, "Failed to remove persisted entry");
            }
        }

        info!("Credentials cleared");
    }

    async fn get_entry(&self, key: &str) -> Result<Option<String>> {
        self.store
            .get(key)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))
    }

    async fn set_entry(&self, key: &str, value: &str) -> Result<()> {
        self.store
            .set(key, value)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;
    use async_trait::async_trait;
    use bridge_traits::error::Result as BridgeResult;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        entries: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl KeyValueStore for MemoryStore {
        async fn set(&self, key: &str, value: &str) -> BridgeResult<()> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn get(&self, key: &str) -> BridgeResult<Option<String>> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn remove(&self, key: &str) -> BridgeResult<()> {
            self.entries.lock().unwrap().remove(key);
            Ok(())
        }

        async fn list_keys(&self) -> BridgeResult<Vec<String>> {
            Ok(self.entries.lock().unwrap().keys().cloned().collect())
        }

        async fn clear_all(&self) -> BridgeResult<()> {
            self.entries.lock().unwrap().clear();
            Ok(())
        }
    }

    fn sample_user() -> User {
        serde_json::from_value(serde_json::json!({
            "id": "4a3f9c7e-5b2d-4e8a-9f1c-0d6b7a8e9f10",
            "email": "alice@example.com",
            "name": "Alice",
            "skills": ["rust"],
            "average_rating": 4.0,
            "role": "user",
            "created_at": "2024-01-15T10:00:00Z",
            "updated_at": "2024-01-15T10:00:00Z"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_store_tokens_write_through() {
        let store = Arc::new(MemoryStore::default());
        let vault = CredentialVault::new(store.clone());

        vault
            .store_tokens(&TokenPair::new("a1", "r1", 3600))
            .await
            .unwrap();

        assert_eq!(vault.access_token(), Some("a1".to_string()));
        assert_eq!(vault.refresh_token(), Some("r1".to_string()));
        assert_eq!(
            store.get(ACCESS_TOKEN_KEY).await.unwrap(),
            Some("a1".to_string())
        );
        assert_eq!(
            store.get(REFRESH_TOKEN_KEY).await.unwrap(),
            Some("r1".to_string())
        );
    }

    #[tokio::test]
    async fn test_load_rehydrates_mirror() {
        let store = Arc::new(MemoryStore::default());
        store.set(ACCESS_TOKEN_KEY, "persisted-a").await.unwrap();
        store.set(REFRESH_TOKEN_KEY, "persisted-r").await.unwrap();

        let vault = CredentialVault::new(store);
        assert!(vault.access_token().is_none());

        vault.load().await.unwrap();
        assert_eq!(vault.access_token(), Some("persisted-a".to_string()));
        assert_eq!(vault.refresh_token(), Some("persisted-r".to_string()));
    }

    #[tokio::test]
    async fn test_load_discards_corrupted_user() {
        let store = Arc::new(MemoryStore::default());
        store.set(USER_KEY, "{not json").await.unwrap();

        let vault = CredentialVault::new(store.clone());
        vault.load().await.unwrap();

        assert!(vault.cached_user().is_none());
        assert_eq!(store.get(USER_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_and_reload_user() {
        let store = Arc::new(MemoryStore::default());
        let vault = CredentialVault::new(store.clone());

        let user = sample_user();
        vault.store_user(&user).await.unwrap();
        assert_eq!(vault.cached_user().map(|u| u.role), Some(Role::User));

        let vault2 = CredentialVault::new(store);
        vault2.load().await.unwrap();
        assert_eq!(vault2.cached_user().map(|u| u.email), Some(user.email));
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let store = Arc::new(MemoryStore::default());
        let vault = CredentialVault::new(store.clone());

        vault
            .store_tokens(&TokenPair::new("a", "r", 0))
            .await
            .unwrap();
        vault.store_user(&sample_user()).await.unwrap();

        vault.clear().await;

        assert!(vault.access_token().is_none());
        assert!(vault.refresh_token().is_none());
        assert!(vault.cached_user().is_none());
        assert!(store.list_keys().await.unwrap().is_empty());
    }
}
