//! Activity log repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::activity::{ActivityLog, CreateActivityRequest};
use crate::utils::errors::ClubPortalError;

#[derive(Debug, Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append an activity row
    pub async fn create(&self, request: CreateActivityRequest) -> Result<ActivityLog, ClubPortalError> {
        let entry = sqlx::query_as::<_, ActivityLog>(
            r#"
            INSERT INTO activity_logs (user_id, activity_type, description, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, activity_type, description, created_at
            "#
        )
        .bind(request.user_id)
        .bind(request.activity_type)
        .bind(request.description)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Most recent activity first
    pub async fn recent(&self, limit: i64) -> Result<Vec<ActivityLog>, ClubPortalError> {
        let entries = sqlx::query_as::<_, ActivityLog>(
            "SELECT id, user_id, activity_type, description, created_at FROM activity_logs ORDER BY created_at DESC, id DESC LIMIT $1"
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
