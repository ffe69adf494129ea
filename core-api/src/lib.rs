//! # Core API
//!
//! Typed REST surface of the skill-share backend, issued through the
//! authenticated request gateway, plus the [`SkillShareClient`] facade
//! that wires the whole client core together.

pub mod admin;
pub mod client;
pub mod feedback;
pub mod notifications;
pub mod profile;
pub mod sessions;
pub mod types;
pub mod users;

pub use admin::AdminApi;
pub use client::SkillShareClient;
pub use feedback::FeedbackApi;
pub use notifications::NotificationsApi;
pub use profile::ProfileApi;
pub use sessions::SessionsApi;
pub use types::{
    ChangePasswordRequest, Feedback, FeedbackDraft, Notification, SessionDraft, SkillSession,
    UpdateProfileRequest,
};
pub use users::UsersApi;
