//! Profile API: the current user's own record.

use crate::types::{ChangePasswordRequest, UpdateProfileRequest};
use core_auth::{ApiGateway, Result, User};
use std::sync::Arc;
use tracing::instrument;

/// Typed access to the `/api/users/me` endpoints.
#[derive(Clone)]
pub struct ProfileApi {
    gateway: Arc<ApiGateway>,
}

impl ProfileApi {
    pub(crate) fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    /// Update name, bio and skills. Returns the updated record; the session
    /// store's cached copy stays stale until the next user fetch.
    #[instrument(skip(self, request))]
    pub async fn update(&self, request: &UpdateProfileRequest) -> Result<User> {
        self.gateway.put_json("/api/users/me", request).await
    }

    /// Change the account password. Password values never reach logs.
    #[instrument(skip(self, request))]
    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<()> {
        self.gateway
            .put_unit("/api/users/me/password", request)
            .await
    }
}
