//! # Client Configuration
//!
//! Builder-based configuration for the skill-share client core. The builder
//! enforces fail-fast validation: every capability the core needs must be
//! provided (or derivable from the environment) before initialization.
//!
//! ## Required Dependencies
//!
//! - `KeyValueStore` - durable storage for credentials and the cached user
//! - `HttpClient` - HTTP transport to the REST backend
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::ClientConfig;
//! use std::sync::Arc;
//!
//! let config = ClientConfig::builder()
//!     .api_base_url("https://api.skillshare.example")
//!     .http_client(Arc::new(MyHttpClient))
//!     .storage(Arc::new(MyStore))
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use bridge_traits::{HttpClient, KeyValueStore};
use std::sync::Arc;
use std::time::Duration;

/// Environment variable consulted for the API base URL when none is set
/// explicitly.
pub const API_URL_ENV: &str = "SKILLSHARE_API_URL";

/// Default backend origin for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Configuration for the skill-share client core.
///
/// Use [`ClientConfig::builder`] to construct instances.
#[derive(Clone)]
pub struct ClientConfig {
    /// Origin of the REST backend, without a trailing slash
    pub api_base_url: String,

    /// Timeout applied to individual API requests
    pub request_timeout: Duration,

    /// HTTP transport (required)
    pub http_client: Arc<dyn HttpClient>,

    /// Durable key-value storage for session state (required)
    pub storage: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout", &self.request_timeout)
            .field("http_client", &"HttpClient { ... }")
            .field("storage", &"KeyValueStore { ... }")
            .finish()
    }
}

impl ClientConfig {
    /// Start building a configuration.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Default)]
pub struct ClientConfigBuilder {
    api_base_url: Option<String>,
    request_timeout: Option<Duration>,
    http_client: Option<Arc<dyn HttpClient>>,
    storage: Option<Arc<dyn KeyValueStore>>,
}

impl ClientConfigBuilder {
    /// Set the backend origin. A trailing slash is stripped.
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.api_base_url = Some(url.trim_end_matches('/').to_string());
        self
    }

    /// Set the per-request timeout (default: 30 seconds).
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Inject the HTTP transport.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Inject the durable key-value store.
    pub fn storage(mut self, storage: Arc<dyn KeyValueStore>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Validate and build the configuration.
    ///
    /// The base URL falls back to the `SKILLSHARE_API_URL` environment
    /// variable, then to the local-development default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapabilityMissing`] when a required bridge was not
    /// provided.
    pub fn build(self) -> Result<ClientConfig> {
        let api_base_url = self
            .api_base_url
            .or_else(|| std::env::var(API_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        if api_base_url.is_empty() {
            return Err(Error::Config("API base URL must not be empty".to_string()));
        }

        let http_client = self.http_client.ok_or_else(|| Error::CapabilityMissing {
            capability: "HttpClient".to_string(),
            message: "No HTTP client implementation provided. \
                      Desktop: inject bridge_desktop::ReqwestHttpClient. \
                      Other hosts: inject a platform-native adapter."
                .to_string(),
        })?;

        let storage = self.storage.ok_or_else(|| Error::CapabilityMissing {
            capability: "KeyValueStore".to_string(),
            message: "No key-value storage implementation provided. \
                      Desktop: inject bridge_desktop::SqliteKeyValueStore. \
                      Other hosts: inject a platform-native adapter."
                .to_string(),
        })?;

        Ok(ClientConfig {
            api_base_url,
            request_timeout: self.request_timeout.unwrap_or(Duration::from_secs(30)),
            http_client,
            storage,
        })
    }
}
