//! # Core Auth
//!
//! Session state and authenticated request plumbing for the skill-share
//! client core:
//!
//! - [`session::SessionStore`] - login, registration, logout, OAuth callback
//!   consumption, and startup rehydration
//! - [`gateway::ApiGateway`] - bearer injection and coordinated single-flight
//!   token refresh with FIFO replay of queued requests
//! - [`credentials::CredentialVault`] - write-through credential persistence
//!   with a synchronous in-memory mirror
//!
//! Token values never appear in logs, `Debug` output, or error messages.

pub mod credentials;
pub mod error;
pub mod gateway;
pub mod session;
pub mod types;

pub use credentials::CredentialVault;
pub use error::{AuthError, Result};
pub use gateway::{ApiGateway, ApiRequest};
pub use session::SessionStore;
pub use types::{LoginRequest, RegisterRequest, Role, TokenPair, User, UserId};
