//! Database service layer
//!
//! This module provides a high-level interface to database operations

use async_trait::async_trait;
use uuid::Uuid;

use crate::database::{
    ActivityRepository, CertificateRepository, ClubStore, DatabasePool, EventRepository,
    RegistrationRepository, RoleRepository,
};
use crate::models::*;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub events: EventRepository,
    pub registrations: RegistrationRepository,
    pub certificates: CertificateRepository,
    pub roles: RoleRepository,
    pub activity: ActivityRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            events: EventRepository::new(pool.clone()),
            registrations: RegistrationRepository::new(pool.clone()),
            certificates: CertificateRepository::new(pool.clone()),
            roles: RoleRepository::new(pool.clone()),
            activity: ActivityRepository::new(pool),
        }
    }
}

#[async_trait]
impl ClubStore for DatabaseService {
    async fn list_events(&self) -> Result<Vec<Event>> {
        self.events.list().await
    }

    async fn find_event(&self, id: Uuid) -> Result<Option<Event>> {
        self.events.find_by_id(id).await
    }

    async fn create_event(&self, request: CreateEventRequest) -> Result<Event> {
        self.events.create(request).await
    }

    async fn update_event(&self, id: Uuid, request: UpdateEventRequest) -> Result<Option<Event>> {
        self.events.update(id, request).await
    }

    async fn create_registration(&self, request: CreateRegistrationRequest) -> Result<Registration> {
        self.registrations.create(request).await
    }

    async fn find_registration(&self, id: Uuid) -> Result<Option<RegistrationWithEvent>> {
        self.registrations.find_by_id(id).await
    }

    async fn list_registrations(&self) -> Result<Vec<RegistrationWithEvent>> {
        self.registrations.list_with_events().await
    }

    async fn registrations_for_usn(&self, usn: &str) -> Result<Vec<RegistrationWithEvent>> {
        self.registrations.find_by_usn(usn).await
    }

    async fn create_certificate(&self, request: CreateCertificateRequest) -> Result<Certificate> {
        self.certificates.create(request).await
    }

    async fn find_certificate(&self, id: Uuid) -> Result<Option<CertificateWithEvent>> {
        self.certificates.find_by_id(id).await
    }

    async fn certificates_for_usn(&self, usn: &str) -> Result<Vec<CertificateWithEvent>> {
        self.certificates.find_by_usn(usn).await
    }

    async fn certificate_exists(&self, usn: &str, event_id: Uuid) -> Result<bool> {
        self.certificates.exists(usn, event_id).await
    }

    async fn has_role(&self, user_id: Uuid, role: Role) -> Result<bool> {
        self.roles.has_role(user_id, role).await
    }

    async fn grant_role(&self, user_id: Uuid, role: Role) -> Result<()> {
        self.roles.grant(user_id, role).await
    }

    async fn log_activity(&self, request: CreateActivityRequest) -> Result<ActivityLog> {
        self.activity.create(request).await
    }

    async fn recent_activity(&self, limit: i64) -> Result<Vec<ActivityLog>> {
        self.activity.recent(limit).await
    }

    async fn counts(&self) -> Result<DashboardCounts> {
        let (events, registrations, certificates) = futures::try_join!(
            self.events.count(),
            self.registrations.count(),
            self.certificates.count(),
        )?;

        Ok(DashboardCounts {
            events,
            registrations,
            certificates,
        })
    }
}
