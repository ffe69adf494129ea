//! # Event Bus System
//!
//! Provides an event-driven architecture for the client core using
//! `tokio::sync::broadcast`. UI layers subscribe to observe auth state
//! changes (signed in/out, token refreshed, session expired) without
//! polling the session store.
//!
//! ## Usage
//!
//! ### Creating an Event Bus
//!
//! ```rust
//! use core_runtime::events::EventBus;
//!
//! let event_bus = EventBus::new(100); // Buffer size of 100 events
//! ```
//!
//! ### Publishing Events
//!
//! ```rust
//! use core_runtime::events::{EventBus, CoreEvent, AuthEvent};
//!
//! # let event_bus = EventBus::new(100);
//! let event = CoreEvent::Auth(AuthEvent::SignedIn {
//!     user_id: "user-123".to_string(),
//! });
//!
//! event_bus.emit(event).ok();
//! ```
//!
//! ### Subscribing to Events
//!
//! ```rust
//! use core_runtime::events::{EventBus, CoreEvent};
//! use tokio::sync::broadcast::error::RecvError;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let event_bus = EventBus::new(100);
//! let mut stream = event_bus.subscribe();
//!
//! tokio::spawn(async move {
//!     loop {
//!         match stream.recv().await {
//!             Ok(event) => println!("Received: {:?}", event),
//!             Err(RecvError::Lagged(n)) => {
//!                 eprintln!("Missed {} events", n);
//!             }
//!             Err(RecvError::Closed) => break,
//!         }
//!     }
//! });
//! # }
//! ```
//!
//! ## Error Handling
//!
//! The broadcast channel can produce two receive errors:
//!
//! - **`RecvError::Lagged(n)`**: the subscriber was too slow and missed `n`
//!   events. Non-fatal; the subscriber keeps receiving new events.
//! - **`RecvError::Closed`**: all senders were dropped. Treat as shutdown.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

// Re-export commonly used types
pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

/// Top-level event enum encompassing all event categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum CoreEvent {
    /// Authentication-related events
    Auth(AuthEvent),
}

impl fmt::Display for CoreEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreEvent::Auth(e) => write!(f, "auth:{}", e),
        }
    }
}

/// Authentication lifecycle events.
///
/// Emitted by the session store and the request gateway. Token values are
/// never carried in events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuthEvent {
    /// A login, registration, or OAuth callback completed successfully
    SignedIn { user_id: String },
    /// The local session was cleared by an explicit logout
    SignedOut,
    /// A coordinated token refresh completed and new credentials are live
    TokenRefreshed,
    /// The session is no longer recoverable; the UI should present login
    SessionExpired { reason: String },
    /// A non-fatal authentication error occurred
    AuthError { message: String, recoverable: bool },
}

impl fmt::Display for AuthEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthEvent::SignedIn { user_id } => write!(f, "signed_in({})", user_id),
            AuthEvent::SignedOut => write!(f, "signed_out"),
            AuthEvent::TokenRefreshed => write!(f, "token_refreshed"),
            AuthEvent::SessionExpired { reason } => write!(f, "session_expired({})", reason),
            AuthEvent::AuthError { message, .. } => write!(f, "auth_error({})", message),
        }
    }
}

/// Central broadcast channel for publishing core events.
///
/// Cloning an `EventBus` is cheap; all clones share the same channel.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoreEvent>,
}

impl EventBus {
    /// Create a new event bus with the given buffer size.
    pub fn new(buffer_size: usize) -> Self {
        let (sender, _) = broadcast::channel(buffer_size);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Returns the number of subscribers the event was delivered to. An
    /// error means there are no subscribers, which is not a failure for
    /// emitters; callers typically ignore it.
    pub fn emit(&self, event: CoreEvent) -> Result<usize, SendError<CoreEvent>> {
        self.sender.send(event)
    }

    /// Create a new subscription to the event stream.
    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
