//! Activity log model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActivityLog {
    pub id: i64,
    pub user_id: String,
    pub activity_type: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateActivityRequest {
    pub user_id: String,
    pub activity_type: String,
    pub description: String,
}

impl CreateActivityRequest {
    pub fn new(user_id: impl Into<String>, activity_type: &str, description: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            activity_type: activity_type.to_string(),
            description: description.into(),
        }
    }
}

/// Activity types written by the services
pub mod activity_types {
    pub const EVENT_REGISTRATION: &str = "event_registration";
    pub const CERTIFICATE_ISSUED: &str = "certificate_issued";
    pub const EVENT_CREATED: &str = "event_created";
    pub const EVENT_UPDATED: &str = "event_updated";
    pub const ROLE_GRANTED: &str = "role_granted";
}

/// Row counts shown on the admin dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardCounts {
    pub events: i64,
    pub registrations: i64,
    pub certificates: i64,
}
