//! Certificate repository implementation

use sqlx::PgPool;
use uuid::Uuid;
use crate::models::certificate::{Certificate, CertificateWithEvent, CreateCertificateRequest};
use crate::utils::errors::ClubPortalError;

const JOINED_SELECT: &str = r#"
    SELECT c.id, c.student_name, c.usn, c.event_id, c.issued_at, c.certificate_url,
           e.title AS event_title, e.date AS event_date
    FROM certificates c
    INNER JOIN events e ON e.id = c.event_id
"#;

#[derive(Debug, Clone)]
pub struct CertificateRepository {
    pool: PgPool,
}

impl CertificateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a certificate row with a caller-chosen id
    pub async fn create(&self, request: CreateCertificateRequest) -> Result<Certificate, ClubPortalError> {
        let certificate = sqlx::query_as::<_, Certificate>(
            r#"
            INSERT INTO certificates (id, student_name, usn, event_id, issued_at, certificate_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, student_name, usn, event_id, issued_at, certificate_url
            "#
        )
        .bind(request.id)
        .bind(request.student_name)
        .bind(request.usn)
        .bind(request.event_id)
        .bind(request.issued_at)
        .bind(request.certificate_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(certificate)
    }

    /// Find certificate by ID, joined with its event
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CertificateWithEvent>, ClubPortalError> {
        let certificate = sqlx::query_as::<_, CertificateWithEvent>(&format!("{JOINED_SELECT} WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(certificate)
    }

    /// Certificates issued to a USN, oldest first
    pub async fn find_by_usn(&self, usn: &str) -> Result<Vec<CertificateWithEvent>, ClubPortalError> {
        let certificates = sqlx::query_as::<_, CertificateWithEvent>(&format!(
            "{JOINED_SELECT} WHERE c.usn = $1 ORDER BY c.issued_at ASC"
        ))
        .bind(usn)
        .fetch_all(&self.pool)
        .await?;

        Ok(certificates)
    }

    /// Check if a certificate exists for a USN and event
    pub async fn exists(&self, usn: &str, event_id: Uuid) -> Result<bool, ClubPortalError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM certificates WHERE usn = $1 AND event_id = $2"
        )
        .bind(usn)
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0 > 0)
    }

    /// Count total certificates
    pub async fn count(&self) -> Result<i64, ClubPortalError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM certificates")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
