//! REST resource types.
//!
//! Field names mirror the backend's snake_case JSON exactly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A skill-sharing session as returned by the sessions endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSession {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub date_time: DateTime<Utc>,
    pub location: String,
    pub max_participants: u32,
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating or updating a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub date_time: DateTime<Utc>,
    pub location: String,
    pub max_participants: u32,
}

/// Feedback left on a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: Uuid,
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for submitting feedback (rating 1-5).
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackDraft {
    pub rating: u8,
    pub comment: String,
}

/// An unread notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_type: Option<String>,
}

/// Payload for `PUT /api/users/me`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub bio: String,
    pub skills: Vec<String>,
}

/// Payload for `PUT /api/users/me/password`.
///
/// `Debug` redacts both passwords.
#[derive(Clone, Serialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl std::fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangePasswordRequest")
            .field("current_password", &"[REDACTED]")
            .field("new_password", &"[REDACTED]")
            .finish()
    }
}
