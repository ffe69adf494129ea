//! Session Store
//!
//! Owns the authenticated-user state of the client: login, registration,
//! logout, OAuth callback consumption, and startup rehydration. All backend
//! traffic goes through the [`ApiGateway`]; all persistence goes through the
//! [`CredentialVault`].
//!
//! Invariant: the session is authenticated exactly when a user record and an
//! access token are both present and no auth transition is in progress.

use crate::credentials::CredentialVault;
use crate::error::{AuthError, Result};
use crate::gateway::{ApiGateway, ApiRequest};
use crate::types::{LoginRequest, RegisterRequest, TokenPair, User};
use bridge_traits::http::HttpMethod;
use core_runtime::events::{AuthEvent, CoreEvent, EventBus};
use core_runtime::logging::redact_if_sensitive;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use url::form_urlencoded;

/// Authenticated session state and lifecycle operations.
pub struct SessionStore {
    gateway: Arc<ApiGateway>,
    vault: Arc<CredentialVault>,
    events: EventBus,
    loading: AtomicBool,
}

impl SessionStore {
    /// Create a session store. The store starts in the loading state until
    /// [`initialize`](Self::initialize) settles it.
    pub fn new(gateway: Arc<ApiGateway>, vault: Arc<CredentialVault>, events: EventBus) -> Self {
        Self {
            gateway,
            vault,
            events,
            loading: AtomicBool::new(true),
        }
    }

    /// Rehydrate the session from persisted storage.
    ///
    /// With a persisted access token the user record is (re)fetched before
    /// the loading flag clears, so `is_authenticated` never reports a token
    /// without a live user behind it. Without a token the store settles
    /// unauthenticated immediately.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> Result<()> {
        self.loading.store(true, Ordering::SeqCst);

        if let Err(e) = self.vault.load().await {
            warn!(error = %e, "Failed to load persisted credentials");
            self.loading.store(false, Ordering::SeqCst);
            return Err(e);
        }

        match self.vault.access_token() {
            Some(token) => {
                debug!("Persisted access token found, fetching user");
                let result = self.fetch_current_user(Some(&token)).await;
                self.loading.store(false, Ordering::SeqCst);
                result.map(|_| ())
            }
            None => {
                debug!("No persisted access token, session unauthenticated");
                self.loading.store(false, Ordering::SeqCst);
                Ok(())
            }
        }
    }

    /// Authenticate with email/password credentials.
    ///
    /// On success the token pair is persisted and the user record fetched
    /// with the new access token. Any failure clears all credentials before
    /// the error propagates.
    #[instrument(skip(self, credentials), fields(email = %redact_if_sensitive("email", &credentials.email)))]
    pub async fn login(&self, credentials: LoginRequest) -> Result<User> {
        self.loading.store(true, Ordering::SeqCst);
        let result = self.sign_in("/auth/login", &credentials).await;
        self.loading.store(false, Ordering::SeqCst);
        result
    }

    /// Register a new account and sign in with the issued tokens.
    ///
    /// The payload type guarantees no `role` field ever reaches the wire.
    #[instrument(skip(self, data), fields(email = %redact_if_sensitive("email", &data.email)))]
    pub async fn register(&self, data: RegisterRequest) -> Result<User> {
        self.loading.store(true, Ordering::SeqCst);
        let result = self.sign_in("/auth/register", &data).await;
        self.loading.store(false, Ordering::SeqCst);
        result
    }

    /// Sign out.
    ///
    /// The backend is notified best-effort; local credentials are cleared
    /// unconditionally, so logout always succeeds.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        self.loading.store(true, Ordering::SeqCst);

        if self.vault.access_token().is_some() {
            if let Err(e) = self.gateway.post_empty("/api/logout").await {
                debug!(error = %e, "Backend logout failed, continuing with local sign-out");
            }
        }

        self.vault.clear().await;
        self.emit(AuthEvent::SignedOut);
        self.loading.store(false, Ordering::SeqCst);

        info!("Signed out");
    }

    /// Consume an OAuth redirect fragment (`#access_token=...&refresh_token=...`).
    ///
    /// The fragment carries no expiry, so the pair is stored with an
    /// advisory `expires_in` of zero. A fragment missing either token leaves
    /// nothing stored and fails with [`AuthError::OauthInvalid`].
    #[instrument(skip(self, fragment))]
    pub async fn consume_oauth_callback(&self, fragment: &str) -> Result<User> {
        self.loading.store(true, Ordering::SeqCst);
        let result = self.consume_fragment(fragment).await;
        if let Err(e) = &result {
            self.vault.clear().await;
            self.emit(AuthEvent::AuthError {
                message: e.to_string(),
                recoverable: true,
            });
        }
        self.loading.store(false, Ordering::SeqCst);
        result
    }

    /// Fetch the current user record from `GET /api/users/me`.
    ///
    /// Token resolution order: explicit override, then the vault. With no
    /// token at all the session settles unauthenticated without error. A
    /// 401/403 clears credentials and also settles unauthenticated; the
    /// caller decides whether to present a login screen.
    pub async fn fetch_current_user(&self, token_override: Option<&str>) -> Result<Option<User>> {
        let token = token_override
            .map(|t| t.to_string())
            .or_else(|| self.vault.access_token());

        let Some(token) = token else {
            debug!("No access token available, clearing session");
            self.vault.clear().await;
            return Ok(None);
        };

        let request = ApiRequest::new(HttpMethod::Get, "/api/users/me").bearer(&token);
        let response = match self.gateway.send(request).await {
            Ok(response) => response,
            Err(e @ (AuthError::NoRefreshToken | AuthError::RefreshFailed(_))) => {
                // The coordinated refresh already cleared credentials.
                debug!(error = %e, "Session expired while fetching user");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        match response.status {
            status if (200..300).contains(&status) => {
                let user: User = response
                    .json()
                    .map_err(|e| AuthError::Decode(e.to_string()))?;
                self.vault.store_user(&user).await?;
                debug!(user_id = %user.id, "User record refreshed");
                Ok(Some(user))
            }
            401 | 403 => {
                warn!("User fetch rejected, clearing credentials");
                self.vault.clear().await;
                self.emit(AuthEvent::SessionExpired {
                    reason: "user fetch rejected".to_string(),
                });
                Ok(None)
            }
            status => Err(AuthError::Server(status)),
        }
    }

    /// Whether an auth transition (login, logout, rehydration) is running.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// `true` exactly when a user and an access token are both present and
    /// the store is not mid-transition.
    pub fn is_authenticated(&self) -> bool {
        self.vault.cached_user().is_some()
            && self.vault.access_token().is_some()
            && !self.is_loading()
    }

    /// The cached user record, if any.
    pub fn current_user(&self) -> Option<User> {
        self.vault.cached_user()
    }

    async fn sign_in<B: serde::Serialize>(&self, path: &str, payload: &B) -> Result<User> {
        let tokens: TokenPair = match self.gateway.post_json(path, payload).await {
            Ok(tokens) => tokens,
            Err(e) => {
                warn!(error = %e, "Sign-in request failed");
                self.vault.clear().await;
                self.emit(AuthEvent::AuthError {
                    message: e.to_string(),
                    recoverable: true,
                });
                return Err(e);
            }
        };

        self.vault.store_tokens(&tokens).await?;

        let user = self
            .fetch_current_user(Some(&tokens.access_token))
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        self.emit(AuthEvent::SignedIn {
            user_id: user.id.to_string(),
        });
        info!(user_id = %user.id, "Signed in");

        Ok(user)
    }

    async fn consume_fragment(&self, fragment: &str) -> Result<User> {
        let raw = fragment.strip_prefix('#').unwrap_or(fragment);

        let mut access_token = None;
        let mut refresh_token = None;
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "access_token" => access_token = Some(value.into_owned()),
                "refresh_token" => refresh_token = Some(value.into_owned()),
                _ => {}
            }
        }

        let (Some(access), Some(refresh)) = (access_token, refresh_token) else {
            warn!("OAuth callback fragment missing tokens");
            return Err(AuthError::OauthInvalid(
                "fragment missing access_token or refresh_token".to_string(),
            ));
        };

        // No expiry travels in the fragment.
        let tokens = TokenPair::new(access, refresh, 0);
        self.vault.store_tokens(&tokens).await?;

        let user = self
            .fetch_current_user(Some(&tokens.access_token))
            .await?
            .ok_or_else(|| AuthError::OauthInvalid("token rejected by backend".to_string()))?;

        self.emit(AuthEvent::SignedIn {
            user_id: user.id.to_string(),
        });
        info!(user_id = %user.id, "OAuth sign-in completed");

        Ok(user)
    }

    fn emit(&self, event: AuthEvent) {
        let _ = self.events.emit(CoreEvent::Auth(event));
    }
}
