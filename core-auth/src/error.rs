//! Authentication error types.

use thiserror::Error;

/// Errors produced by the session store and the request gateway.
///
/// `Clone` is required so a single refresh outcome can be fanned out to
/// every request queued behind it. Error messages never contain token
/// values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The backend rejected the credentials (401/403 on a typed call)
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Transport-level failure (connection, TLS, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with an unexpected status
    #[error("server returned status {0}")]
    Server(u16),

    /// The OAuth callback fragment was missing required parameters
    #[error("invalid OAuth callback: {0}")]
    OauthInvalid(String),

    /// A refresh was required but no refresh token is stored
    #[error("no refresh token available")]
    NoRefreshToken,

    /// The coordinated token refresh failed; the session is terminal
    #[error("token refresh failed: {0}")]
    RefreshFailed(String),

    /// The durable key-value store failed
    #[error("storage error: {0}")]
    Storage(String),

    /// A response body could not be deserialized
    #[error("decode error: {0}")]
    Decode(String),
}

/// Result type alias for auth operations
pub type Result<T> = std::result::Result<T, AuthError>;
