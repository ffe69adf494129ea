//! # Core Runtime
//!
//! Ambient runtime services for the skill-share client core:
//!
//! - [`events`] - typed event bus for auth state changes
//! - [`config`] - client configuration with fail-fast capability validation
//! - [`logging`] - tracing/tracing-subscriber initialization
//! - [`error`] - runtime error type

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, Result};
pub use events::{AuthEvent, CoreEvent, EventBus};
pub use logging::{init_logging, LogFormat, LogLevel, LoggingConfig};
