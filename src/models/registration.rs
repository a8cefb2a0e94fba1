//! Registration model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Registration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub usn: String,
    pub department: String,
    pub year: String,
    pub created_at: DateTime<Utc>,
}

/// Registration joined with the title, date and status of its event
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RegistrationWithEvent {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub usn: String,
    pub department: String,
    pub year: String,
    pub created_at: DateTime<Utc>,
    pub event_title: String,
    pub event_date: DateTime<Utc>,
    pub event_status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRegistrationRequest {
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub usn: String,
    pub department: String,
    pub year: String,
}

/// Raw registration form as submitted; every field may be blank
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub usn: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub event_id: String,
}

impl RegistrationForm {
    /// Blank form with the email pre-filled, as shown after a submission
    pub fn reset_with_email(email: Option<&str>) -> Self {
        Self {
            email: email.unwrap_or_default().to_string(),
            ..Self::default()
        }
    }
}

/// Result of a successful submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReceipt {
    pub registration: Registration,
    pub next_form: RegistrationForm,
}

/// Registration row as shown on the admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminRegistrationView {
    #[serde(flatten)]
    pub registration: RegistrationWithEvent,
    pub verified: bool,
}
