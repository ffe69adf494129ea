//! Feedback API: reading and leaving session feedback.

use crate::types::{Feedback, FeedbackDraft};
use core_auth::{ApiGateway, Result};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Typed access to the `/api/sessions/{id}/feedback` endpoints.
#[derive(Clone)]
pub struct FeedbackApi {
    gateway: Arc<ApiGateway>,
}

impl FeedbackApi {
    pub(crate) fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    /// All feedback left on a session.
    pub async fn list(&self, session_id: Uuid) -> Result<Vec<Feedback>> {
        self.gateway
            .get_json(&format!("/api/sessions/{}/feedback", session_id))
            .await
    }

    /// Leave feedback on a session (rating 1-5).
    #[instrument(skip(self, draft), fields(rating = draft.rating))]
    pub async fn submit(&self, session_id: Uuid, draft: &FeedbackDraft) -> Result<Feedback> {
        self.gateway
            .post_json(&format!("/api/sessions/{}/feedback", session_id), draft)
            .await
    }
}
