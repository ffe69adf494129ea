//! Client facade wiring configuration, vault, gateway and session store.

use crate::admin::AdminApi;
use crate::feedback::FeedbackApi;
use crate::notifications::NotificationsApi;
use crate::profile::ProfileApi;
use crate::sessions::SessionsApi;
use crate::users::UsersApi;
use core_auth::{ApiGateway, CredentialVault, SessionStore};
use core_runtime::config::ClientConfig;
use core_runtime::events::{CoreEvent, EventBus, Receiver};
use std::sync::Arc;
use tracing::info;

/// Entry point for host applications.
///
/// Owns the full client core: the credential vault, the authenticated
/// request gateway, the session store, and the typed API modules. Hosts
/// construct one instance at startup, call [`initialize`](Self::initialize),
/// and subscribe to the event bus for auth state changes.
///
/// ```ignore
/// let config = ClientConfig::builder()
///     .http_client(http)
///     .storage(storage)
///     .build()?;
///
/// let client = SkillShareClient::new(config);
/// client.initialize().await?;
///
/// if client.session().is_authenticated() {
///     let sessions = client.sessions().recommended().await?;
/// }
/// ```
pub struct SkillShareClient {
    session: Arc<SessionStore>,
    sessions: SessionsApi,
    feedback: FeedbackApi,
    notifications: NotificationsApi,
    profile: ProfileApi,
    users: UsersApi,
    admin: AdminApi,
    events: EventBus,
}

impl SkillShareClient {
    /// Wire up the client core from a validated configuration.
    pub fn new(config: ClientConfig) -> Self {
        let events = EventBus::default();
        let vault = Arc::new(CredentialVault::new(config.storage));
        let gateway = Arc::new(
            ApiGateway::new(
                config.http_client,
                vault.clone(),
                config.api_base_url.clone(),
                events.clone(),
            )
            .with_request_timeout(config.request_timeout),
        );
        let session = Arc::new(SessionStore::new(gateway.clone(), vault, events.clone()));

        info!(base_url = %config.api_base_url, "Client core constructed");

        Self {
            session,
            sessions: SessionsApi::new(gateway.clone()),
            feedback: FeedbackApi::new(gateway.clone()),
            notifications: NotificationsApi::new(gateway.clone()),
            profile: ProfileApi::new(gateway.clone()),
            users: UsersApi::new(gateway.clone()),
            admin: AdminApi::new(gateway),
            events,
        }
    }

    /// Rehydrate the session from persisted storage. Call once at startup.
    pub async fn initialize(&self) -> core_auth::Result<()> {
        self.session.initialize().await
    }

    /// Session state and auth lifecycle operations.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn sessions(&self) -> &SessionsApi {
        &self.sessions
    }

    pub fn feedback(&self) -> &FeedbackApi {
        &self.feedback
    }

    pub fn notifications(&self) -> &NotificationsApi {
        &self.notifications
    }

    pub fn profile(&self) -> &ProfileApi {
        &self.profile
    }

    pub fn users(&self) -> &UsersApi {
        &self.users
    }

    pub fn admin(&self) -> &AdminApi {
        &self.admin
    }

    /// Subscribe to core events (auth state changes).
    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.events.subscribe()
    }

    /// The shared event bus.
    pub fn events(&self) -> &EventBus {
        &self.events
    }
}
