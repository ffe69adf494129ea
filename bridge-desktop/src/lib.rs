//! # Desktop Bridge Implementations
//!
//! Desktop-ready implementations of the host bridge traits:
//!
//! - [`ReqwestHttpClient`](http::ReqwestHttpClient) - HTTP via reqwest with
//!   connection pooling and TLS
//! - [`SqliteKeyValueStore`](storage::SqliteKeyValueStore) - durable
//!   key-value storage backed by SQLite

pub mod http;
pub mod storage;

pub use http::ReqwestHttpClient;
pub use storage::SqliteKeyValueStore;
