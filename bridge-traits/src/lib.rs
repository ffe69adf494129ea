//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host shell.
//!
//! ## Overview
//!
//! This crate defines the contract between the skill-share client core and
//! platform-specific implementations. Each trait represents a capability the
//! core requires but that is provided differently per host (desktop shell,
//! mobile shell, web).
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - Async HTTP operations against the
//!   skill-share REST backend
//! - [`KeyValueStore`](storage::KeyValueStore) - Durable string-keyed storage
//!   for credentials and the cached user record
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError) for consistent
//! error handling. Platform implementations should convert platform-specific
//! errors to `BridgeError` and provide actionable messages.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` bounds so implementations can be
//! shared across async tasks behind `Arc`.

pub mod error;
pub mod http;
pub mod storage;

pub use error::BridgeError;

// Re-export commonly used types
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use storage::KeyValueStore;
