//! User role repository implementation

use sqlx::PgPool;
use chrono::Utc;
use uuid::Uuid;
use crate::models::role::Role;
use crate::utils::errors::ClubPortalError;

#[derive(Debug, Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Check if a user holds a role
    pub async fn has_role(&self, user_id: Uuid, role: Role) -> Result<bool, ClubPortalError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM user_roles WHERE user_id = $1 AND role = $2"
        )
        .bind(user_id)
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0 > 0)
    }

    /// Grant a role; granting an existing role is a no-op
    pub async fn grant(&self, user_id: Uuid, role: Role) -> Result<(), ClubPortalError> {
        sqlx::query(
            r#"
            INSERT INTO user_roles (user_id, role, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, role) DO NOTHING
            "#
        )
        .bind(user_id)
        .bind(role.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
