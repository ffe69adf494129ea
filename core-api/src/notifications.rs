//! Notifications API.

use crate::types::Notification;
use core_auth::{ApiGateway, Result};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Typed access to the `/api/notifications` endpoints.
#[derive(Clone)]
pub struct NotificationsApi {
    gateway: Arc<ApiGateway>,
}

impl NotificationsApi {
    pub(crate) fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    /// Most recent unread notifications, newest first.
    pub async fn unread(&self, limit: u32) -> Result<Vec<Notification>> {
        self.gateway
            .get_json(&format!("/api/notifications/unread?limit={}", limit))
            .await
    }

    #[instrument(skip(self))]
    pub async fn mark_read(&self, id: Uuid) -> Result<()> {
        self.gateway
            .post_empty(&format!("/api/notifications/{}/read", id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn mark_all_read(&self) -> Result<()> {
        self.gateway.post_empty("/api/notifications/read-all").await
    }
}
