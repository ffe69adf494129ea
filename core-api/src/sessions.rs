//! Sessions API: discovery, CRUD, and participation.

use crate::types::{SessionDraft, SkillSession};
use core_auth::{ApiGateway, Result, User};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Typed access to the `/api/sessions` endpoints.
#[derive(Clone)]
pub struct SessionsApi {
    gateway: Arc<ApiGateway>,
}

impl SessionsApi {
    pub(crate) fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    /// All upcoming sessions.
    pub async fn list(&self) -> Result<Vec<SkillSession>> {
        self.gateway.get_json("/api/sessions").await
    }

    /// Sessions recommended for the current user's skills.
    pub async fn recommended(&self) -> Result<Vec<SkillSession>> {
        self.gateway.get_json("/api/sessions/recommended").await
    }

    /// Sessions the current user created or joined.
    pub async fn mine(&self) -> Result<Vec<SkillSession>> {
        self.gateway.get_json("/api/sessions/my").await
    }

    pub async fn get(&self, id: Uuid) -> Result<SkillSession> {
        self.gateway.get_json(&format!("/api/sessions/{}", id)).await
    }

    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create(&self, draft: &SessionDraft) -> Result<SkillSession> {
        self.gateway.post_json("/api/sessions", draft).await
    }

    #[instrument(skip(self, draft))]
    pub async fn update(&self, id: Uuid, draft: &SessionDraft) -> Result<SkillSession> {
        self.gateway
            .put_json(&format!("/api/sessions/{}", id), draft)
            .await
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, id: Uuid) -> Result<()> {
        self.gateway.delete(&format!("/api/sessions/{}", id)).await
    }

    /// Users participating in a session.
    pub async fn participants(&self, id: Uuid) -> Result<Vec<User>> {
        self.gateway
            .get_json(&format!("/api/sessions/{}/participants", id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn join(&self, id: Uuid) -> Result<()> {
        self.gateway
            .post_empty(&format!("/api/sessions/{}/join", id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn leave(&self, id: Uuid) -> Result<()> {
        self.gateway
            .post_empty(&format!("/api/sessions/{}/leave", id))
            .await
    }
}
