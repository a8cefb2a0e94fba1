//! Storage seam between the services and the database
//!
//! Services talk to a [`ClubStore`] instead of concrete repositories so the
//! same flows run against Postgres in production and against
//! [`MemoryStore`](super::memory::MemoryStore) in tests and local runs.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::*;
use crate::utils::errors::Result;

#[async_trait]
pub trait ClubStore: Send + Sync {
    async fn list_events(&self) -> Result<Vec<Event>>;
    async fn find_event(&self, id: Uuid) -> Result<Option<Event>>;
    async fn create_event(&self, request: CreateEventRequest) -> Result<Event>;
    /// Partial update; `None` when the event does not exist
    async fn update_event(&self, id: Uuid, request: UpdateEventRequest) -> Result<Option<Event>>;

    async fn create_registration(&self, request: CreateRegistrationRequest) -> Result<Registration>;
    async fn find_registration(&self, id: Uuid) -> Result<Option<RegistrationWithEvent>>;
    /// All registrations joined with their events, newest first
    async fn list_registrations(&self) -> Result<Vec<RegistrationWithEvent>>;
    async fn registrations_for_usn(&self, usn: &str) -> Result<Vec<RegistrationWithEvent>>;

    async fn create_certificate(&self, request: CreateCertificateRequest) -> Result<Certificate>;
    async fn find_certificate(&self, id: Uuid) -> Result<Option<CertificateWithEvent>>;
    async fn certificates_for_usn(&self, usn: &str) -> Result<Vec<CertificateWithEvent>>;
    async fn certificate_exists(&self, usn: &str, event_id: Uuid) -> Result<bool>;

    async fn has_role(&self, user_id: Uuid, role: Role) -> Result<bool>;
    async fn grant_role(&self, user_id: Uuid, role: Role) -> Result<()>;

    async fn log_activity(&self, request: CreateActivityRequest) -> Result<ActivityLog>;
    async fn recent_activity(&self, limit: i64) -> Result<Vec<ActivityLog>>;

    async fn counts(&self) -> Result<DashboardCounts>;
}

impl std::fmt::Debug for dyn ClubStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ClubStore")
    }
}
