//! Users API: public user listings.

use core_auth::{ApiGateway, Result, User, UserId};
use std::sync::Arc;

/// Typed access to the `/api/users` endpoints.
#[derive(Clone)]
pub struct UsersApi {
    gateway: Arc<ApiGateway>,
}

impl UsersApi {
    pub(crate) fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        self.gateway.get_json("/api/users").await
    }

    pub async fn get(&self, id: UserId) -> Result<User> {
        self.gateway.get_json(&format!("/api/users/{}", id)).await
    }
}
