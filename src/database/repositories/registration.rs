//! Registration repository implementation

use sqlx::PgPool;
use chrono::Utc;
use uuid::Uuid;
use crate::models::registration::{Registration, RegistrationWithEvent, CreateRegistrationRequest};
use crate::utils::errors::ClubPortalError;

const JOINED_SELECT: &str = r#"
    SELECT r.id, r.event_id, r.user_id, r.name, r.email, r.usn, r.department, r.year, r.created_at,
           e.title AS event_title, e.date AS event_date, e.status AS event_status
    FROM registrations r
    INNER JOIN events e ON e.id = r.event_id
"#;

#[derive(Debug, Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a registration row
    pub async fn create(&self, request: CreateRegistrationRequest) -> Result<Registration, ClubPortalError> {
        let registration = sqlx::query_as::<_, Registration>(
            r#"
            INSERT INTO registrations (id, event_id, user_id, name, email, usn, department, year, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, event_id, user_id, name, email, usn, department, year, created_at
            "#
        )
        .bind(Uuid::new_v4())
        .bind(request.event_id)
        .bind(request.user_id)
        .bind(request.name)
        .bind(request.email)
        .bind(request.usn)
        .bind(request.department)
        .bind(request.year)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Find registration by ID, joined with its event
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<RegistrationWithEvent>, ClubPortalError> {
        let registration = sqlx::query_as::<_, RegistrationWithEvent>(&format!("{JOINED_SELECT} WHERE r.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(registration)
    }

    /// All registrations with their events, newest first
    pub async fn list_with_events(&self) -> Result<Vec<RegistrationWithEvent>, ClubPortalError> {
        let registrations = sqlx::query_as::<_, RegistrationWithEvent>(&format!(
            "{JOINED_SELECT} ORDER BY r.created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }

    /// Registrations for a USN with their events, oldest first
    pub async fn find_by_usn(&self, usn: &str) -> Result<Vec<RegistrationWithEvent>, ClubPortalError> {
        let registrations = sqlx::query_as::<_, RegistrationWithEvent>(&format!(
            "{JOINED_SELECT} WHERE r.usn = $1 ORDER BY r.created_at ASC"
        ))
        .bind(usn)
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }

    /// Count total registrations
    pub async fn count(&self) -> Result<i64, ClubPortalError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM registrations")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
