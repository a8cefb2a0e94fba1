//! Admin dashboard: activity feed, counts and role grants

use std::sync::Arc;

use uuid::Uuid;

use crate::database::ClubStore;
use crate::models::{activity_types, ActivityLog, CreateActivityRequest, DashboardCounts, Identity, Role};
use crate::utils::errors::Result;
use crate::utils::logging::log_admin_action;

pub const DEFAULT_ACTIVITY_LIMIT: i64 = 20;
pub const MAX_ACTIVITY_LIMIT: i64 = 100;

#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn ClubStore>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn ClubStore>) -> Self {
        Self { store }
    }

    /// Most recent activity first; `limit` is clamped to 1..=100
    pub async fn recent_activity(&self, limit: Option<i64>) -> Result<Vec<ActivityLog>> {
        let limit = limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT).clamp(1, MAX_ACTIVITY_LIMIT);
        self.store.recent_activity(limit).await
    }

    pub async fn counts(&self) -> Result<DashboardCounts> {
        self.store.counts().await
    }

    /// Grant a role; granting an existing role is a no-op
    pub async fn grant_role(&self, admin: &Identity, user_id: Uuid, role: Role) -> Result<()> {
        self.store.grant_role(user_id, role).await?;
        self.store
            .log_activity(CreateActivityRequest::new(
                admin.subject(),
                activity_types::ROLE_GRANTED,
                format!("Granted {} role to {}", role, user_id),
            ))
            .await?;
        log_admin_action(&admin.subject(), "grant_role", Some(&user_id.to_string()), Some(role.as_str()));
        Ok(())
    }
}

impl std::fmt::Debug for DashboardService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardService").finish_non_exhaustive()
    }
}
