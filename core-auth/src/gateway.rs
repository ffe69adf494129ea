//! Authenticated Request Gateway
//!
//! Dispatches every API call through two interceptors:
//!
//! - Request side: a `Bearer` header derived from the credential vault on
//!   every dispatch, skipped for unauthenticated-by-design `/auth/*` paths.
//! - Response side: on a 401 from an authenticated path, a coordinated
//!   token refresh. At most one refresh is in flight at a time; every other
//!   request that hits a 401 meanwhile parks on a oneshot waiter and settles
//!   with the shared outcome. Each original request retries at most once.
//!
//! The refresh coordinator is an explicit state machine behind a single
//! async mutex, so there is no window where two tasks can both decide to
//! become the refresher.

use crate::credentials::CredentialVault;
use crate::error::{AuthError, Result};
use crate::types::TokenPair;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use bytes::Bytes;
use core_runtime::events::{AuthEvent, CoreEvent, EventBus};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, Mutex};
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

/// Upper bound on a single refresh attempt. A timed-out refresh settles as
/// a failure so queued requests can never stall forever.
const DEFAULT_REFRESH_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-request transport timeout when the host configures none. Matches the
/// `ClientConfig` builder default.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Refresh coordinator state.
///
/// `Refreshing` owns the FIFO queue of waiters for exactly one refresh
/// cycle; the queue is drained (in order) when the refresh settles and the
/// state returns to `Idle`.
enum RefreshState {
    Idle,
    Refreshing {
        waiters: Vec<oneshot::Sender<Result<String>>>,
    },
}

/// An API request relative to the configured backend origin.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Bytes>,
    /// Explicit token taking precedence over the vault for this request
    pub bearer_override: Option<String>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            bearer_override: None,
        }
    }

    /// Attach a JSON body.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let bytes = serde_json::to_vec(body)
            .map_err(|e| AuthError::Decode(format!("request serialization failed: {}", e)))?;
        self.body = Some(Bytes::from(bytes));
        Ok(self)
    }

    /// Use an explicit bearer token instead of the vault's current one.
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer_override = Some(token.into());
        self
    }
}

/// Gateway routing all API traffic through the auth interceptors.
pub struct ApiGateway {
    http: Arc<dyn HttpClient>,
    vault: Arc<CredentialVault>,
    base_url: String,
    refresh: Mutex<RefreshState>,
    events: EventBus,
    refresh_timeout: Duration,
    request_timeout: Duration,
}

impl ApiGateway {
    pub fn new(
        http: Arc<dyn HttpClient>,
        vault: Arc<CredentialVault>,
        base_url: impl Into<String>,
        events: EventBus,
    ) -> Self {
        Self {
            http,
            vault,
            base_url: base_url.into(),
            refresh: Mutex::new(RefreshState::Idle),
            events,
            refresh_timeout: DEFAULT_REFRESH_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the refresh timeout (used by tests).
    pub fn with_refresh_timeout(mut self, timeout: Duration) -> Self {
        self.refresh_timeout = timeout;
        self
    }

    /// Set the transport timeout stamped on every dispatched request.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Paths that never carry a bearer header and never trigger a refresh.
    fn is_public_path(path: &str) -> bool {
        path.starts_with("/auth/")
    }

    /// Dispatch a request through both interceptors.
    ///
    /// On a 401 from an authenticated path the request joins the coordinated
    /// refresh and, if it yields a token, is replayed exactly once with that
    /// token. A 401 on the replay is returned as-is.
    #[instrument(skip(self, request), fields(method = ?request.method, path = %request.path))]
    pub async fn send(&self, request: ApiRequest) -> Result<HttpResponse> {
        let public = Self::is_public_path(&request.path);
        let mut bearer = if public {
            None
        } else {
            request
                .bearer_override
                .clone()
                .or_else(|| self.vault.access_token())
        };

        let mut retried = false;
        loop {
            let response = self.dispatch(&request, bearer.as_deref()).await?;

            if response.status == 401 && !public && !retried {
                debug!("Received 401, entering coordinated refresh");
                retried = true;
                let token = self.access_token_after_refresh().await?;
                bearer = Some(token);
                continue;
            }

            return Ok(response);
        }
    }

    /// Typed GET returning a deserialized body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(ApiRequest::new(HttpMethod::Get, path)).await?;
        Self::decode(response)
    }

    /// Typed POST with a JSON body, returning a deserialized body.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = ApiRequest::new(HttpMethod::Post, path).json(body)?;
        let response = self.send(request).await?;
        Self::decode(response)
    }

    /// Typed PUT with a JSON body, returning a deserialized body.
    pub async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = ApiRequest::new(HttpMethod::Put, path).json(body)?;
        let response = self.send(request).await?;
        Self::decode(response)
    }

    /// PUT with a JSON body, discarding the response body.
    pub async fn put_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let request = ApiRequest::new(HttpMethod::Put, path).json(body)?;
        let response = self.send(request).await?;
        Self::check_status(&response)
    }

    /// POST with an empty body, discarding the response body.
    pub async fn post_empty(&self, path: &str) -> Result<()> {
        let response = self.send(ApiRequest::new(HttpMethod::Post, path)).await?;
        Self::check_status(&response)
    }

    /// DELETE, discarding the response body.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let response = self.send(ApiRequest::new(HttpMethod::Delete, path)).await?;
        Self::check_status(&response)
    }

    async fn dispatch(&self, request: &ApiRequest, bearer: Option<&str>) -> Result<HttpResponse> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut http_request =
            HttpRequest::new(request.method, url).timeout(self.request_timeout);

        if let Some(body) = &request.body {
            http_request = http_request
                .header("Content-Type", "application/json")
                .body(body.clone());
        }
        if let Some(token) = bearer {
            http_request = http_request.bearer_token(token);
        }

        self.http
            .execute(http_request)
            .await
            .map_err(|e| AuthError::Network(e.to_string()))
    }

    /// Join or lead the coordinated refresh and return the access token it
    /// produced.
    async fn access_token_after_refresh(&self) -> Result<String> {
        let waiter = {
            let mut state = self.refresh.lock().await;
            match &mut *state {
                RefreshState::Refreshing { waiters } => {
                    let (tx, rx) = oneshot::channel();
                    waiters.push(tx);
                    Some(rx)
                }
                RefreshState::Idle => {
                    *state = RefreshState::Refreshing {
                        waiters: Vec::new(),
                    };
                    None
                }
            }
        };

        if let Some(rx) = waiter {
            debug!("Refresh already in flight, queueing");
            return rx.await.map_err(|_| {
                AuthError::RefreshFailed("refresh coordinator dropped".to_string())
            })?;
        }

        let outcome = self.run_refresh().await;

        // Settle and drain the queue in FIFO order; the state must return to
        // Idle no matter how the refresh ended.
        let waiters = {
            let mut state = self.refresh.lock().await;
            match std::mem::replace(&mut *state, RefreshState::Idle) {
                RefreshState::Refreshing { waiters } => waiters,
                RefreshState::Idle => Vec::new(),
            }
        };
        for waiter in waiters {
            let _ = waiter.send(outcome.clone());
        }

        outcome
    }

    /// Perform the refresh call itself.
    ///
    /// Failure is terminal for the session: credentials are cleared before
    /// the outcome fans out, so no replay can run with stale tokens.
    async fn run_refresh(&self) -> Result<String> {
        let Some(refresh_token) = self.vault.refresh_token() else {
            warn!("No refresh token available, session is terminal");
            self.vault.clear().await;
            self.emit(AuthEvent::SessionExpired {
                reason: "no refresh token".to_string(),
            });
            return Err(AuthError::NoRefreshToken);
        };

        info!("Refreshing access token");

        match timeout(self.refresh_timeout, self.call_refresh(&refresh_token)).await {
            Ok(Ok(tokens)) => {
                self.vault.store_tokens(&tokens).await?;
                self.emit(AuthEvent::TokenRefreshed);
                info!("Access token refreshed");
                Ok(tokens.access_token)
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Token refresh failed");
                self.vault.clear().await;
                self.emit(AuthEvent::SessionExpired {
                    reason: "refresh failed".to_string(),
                });
                Err(AuthError::RefreshFailed(e.to_string()))
            }
            Err(_) => {
                warn!("Token refresh timed out");
                self.vault.clear().await;
                self.emit(AuthEvent::SessionExpired {
                    reason: "refresh timed out".to_string(),
                });
                Err(AuthError::RefreshFailed("refresh timed out".to_string()))
            }
        }
    }

    async fn call_refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        let body = serde_json::json!({ "refresh_token": refresh_token });
        let request = ApiRequest::new(HttpMethod::Post, "/auth/refresh").json(&body)?;

        let response = self.dispatch(&request, None).await?;
        if !response.is_success() {
            return Err(Self::map_status(response.status));
        }

        response
            .json::<TokenPair>()
            .map_err(|e| AuthError::Decode(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T> {
        Self::check_status(&response)?;
        response.json().map_err(|e| AuthError::Decode(e.to_string()))
    }

    fn check_status(response: &HttpResponse) -> Result<()> {
        if response.is_success() {
            Ok(())
        } else {
            Err(Self::map_status(response.status))
        }
    }

    fn map_status(status: u16) -> AuthError {
        match status {
            401 | 403 => AuthError::InvalidCredentials,
            other => AuthError::Server(other),
        }
    }

    fn emit(&self, event: AuthEvent) {
        let _ = self.events.emit(CoreEvent::Auth(event));
    }
}
