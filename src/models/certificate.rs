//! Certificate model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Certificate {
    pub id: Uuid,
    pub student_name: String,
    pub usn: String,
    pub event_id: Uuid,
    pub issued_at: DateTime<Utc>,
    pub certificate_url: String,
}

/// Certificate joined with the title and date of its event
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CertificateWithEvent {
    pub id: Uuid,
    pub student_name: String,
    pub usn: String,
    pub event_id: Uuid,
    pub issued_at: DateTime<Utc>,
    pub certificate_url: String,
    pub event_title: String,
    pub event_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCertificateRequest {
    pub id: Uuid,
    pub student_name: String,
    pub usn: String,
    pub event_id: Uuid,
    pub issued_at: DateTime<Utc>,
    pub certificate_url: String,
}

/// Display record returned by certificate lookups and used for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateView {
    pub id: Uuid,
    pub event_name: String,
    pub date: String,
    pub student_name: String,
    pub usn: String,
    pub certificate_url: String,
}
