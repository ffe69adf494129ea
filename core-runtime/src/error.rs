//! Runtime-level errors: configuration validation and host capability gaps.

use thiserror::Error;

/// Errors raised while assembling the client runtime.
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration value is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The host did not supply a bridge the runtime cannot run without.
    /// Raised fail-fast at build time, never mid-operation.
    #[error("Capability missing: {capability} - {message}")]
    CapabilityMissing { capability: String, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
