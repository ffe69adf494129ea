//! Admin and moderator API.
//!
//! The backend enforces the role checks; these calls surface
//! `InvalidCredentials` when the current user lacks the required role.

use core_auth::{ApiGateway, Result, Role, User, UserId};
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

#[derive(Serialize)]
struct UpdateRoleRequest {
    role: Role,
}

/// Typed access to the `/api/admin` and `/api/moderator` endpoints.
#[derive(Clone)]
pub struct AdminApi {
    gateway: Arc<ApiGateway>,
}

impl AdminApi {
    pub(crate) fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.gateway.get_json("/api/admin/users").await
    }

    #[instrument(skip(self))]
    pub async fn update_role(&self, user_id: UserId, role: Role) -> Result<()> {
        self.gateway
            .put_unit(
                &format!("/api/admin/users/{}/role", user_id),
                &UpdateRoleRequest { role },
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: UserId) -> Result<()> {
        self.gateway
            .delete(&format!("/api/admin/users/{}", user_id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_session(&self, session_id: Uuid) -> Result<()> {
        self.gateway
            .delete(&format!("/api/admin/sessions/{}", session_id))
            .await
    }

    /// Moderator-scoped session removal.
    #[instrument(skip(self))]
    pub async fn moderator_delete_session(&self, session_id: Uuid) -> Result<()> {
        self.gateway
            .delete(&format!("/api/moderator/sessions/{}", session_id))
            .await
    }
}
