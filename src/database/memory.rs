//! In-memory [`ClubStore`] used by tests and local development

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::ClubStore;
use crate::models::*;
use crate::utils::errors::{ClubPortalError, Result};

#[derive(Default)]
struct Tables {
    events: Vec<Event>,
    registrations: Vec<Registration>,
    certificates: Vec<Certificate>,
    roles: HashSet<(Uuid, Role)>,
    activity: Vec<ActivityLog>,
}

/// Store backed by process memory. Joins mirror the SQL repositories: rows
/// whose event is missing are left out of joined reads.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    next_activity_id: AtomicI64,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail, as if the database were unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored certificates
    pub async fn certificate_count(&self) -> usize {
        self.tables.read().await.certificates.len()
    }

    /// Number of stored activity rows
    pub async fn activity_count(&self) -> usize {
        self.tables.read().await.activity.len()
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ClubPortalError::ServiceUnavailable("store is unavailable".to_string()));
        }
        Ok(())
    }
}

fn join_registration(tables: &Tables, registration: &Registration) -> Option<RegistrationWithEvent> {
    let event = tables.events.iter().find(|e| e.id == registration.event_id)?;
    Some(RegistrationWithEvent {
        id: registration.id,
        event_id: registration.event_id,
        user_id: registration.user_id,
        name: registration.name.clone(),
        email: registration.email.clone(),
        usn: registration.usn.clone(),
        department: registration.department.clone(),
        year: registration.year.clone(),
        created_at: registration.created_at,
        event_title: event.title.clone(),
        event_date: event.date,
        event_status: event.status.clone(),
    })
}

fn join_certificate(tables: &Tables, certificate: &Certificate) -> Option<CertificateWithEvent> {
    let event = tables.events.iter().find(|e| e.id == certificate.event_id)?;
    Some(CertificateWithEvent {
        id: certificate.id,
        student_name: certificate.student_name.clone(),
        usn: certificate.usn.clone(),
        event_id: certificate.event_id,
        issued_at: certificate.issued_at,
        certificate_url: certificate.certificate_url.clone(),
        event_title: event.title.clone(),
        event_date: event.date,
    })
}

#[async_trait]
impl ClubStore for MemoryStore {
    async fn list_events(&self) -> Result<Vec<Event>> {
        self.check_available()?;
        let mut events = self.tables.read().await.events.clone();
        events.sort_by_key(|e| e.date);
        Ok(events)
    }

    async fn find_event(&self, id: Uuid) -> Result<Option<Event>> {
        self.check_available()?;
        Ok(self.tables.read().await.events.iter().find(|e| e.id == id).cloned())
    }

    async fn create_event(&self, request: CreateEventRequest) -> Result<Event> {
        self.check_available()?;
        let now = Utc::now();
        let event = Event {
            id: Uuid::new_v4(),
            title: request.title,
            date: request.date,
            description: request.description,
            location: request.location,
            capacity: request.capacity,
            status: request.status.unwrap_or_default().as_str().to_string(),
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.events.push(event.clone());
        Ok(event)
    }

    async fn update_event(&self, id: Uuid, request: UpdateEventRequest) -> Result<Option<Event>> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let Some(event) = tables.events.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };

        if let Some(title) = request.title {
            event.title = title;
        }
        if let Some(date) = request.date {
            event.date = date;
        }
        if let Some(description) = request.description {
            event.description = Some(description);
        }
        if let Some(location) = request.location {
            event.location = Some(location);
        }
        if let Some(capacity) = request.capacity {
            event.capacity = Some(capacity);
        }
        if let Some(status) = request.status {
            event.status = status.as_str().to_string();
        }
        event.updated_at = Utc::now();

        Ok(Some(event.clone()))
    }

    async fn create_registration(&self, request: CreateRegistrationRequest) -> Result<Registration> {
        self.check_available()?;
        let registration = Registration {
            id: Uuid::new_v4(),
            event_id: request.event_id,
            user_id: request.user_id,
            name: request.name,
            email: request.email,
            usn: request.usn,
            department: request.department,
            year: request.year,
            created_at: Utc::now(),
        };
        self.tables.write().await.registrations.push(registration.clone());
        Ok(registration)
    }

    async fn find_registration(&self, id: Uuid) -> Result<Option<RegistrationWithEvent>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .registrations
            .iter()
            .find(|r| r.id == id)
            .and_then(|r| join_registration(&tables, r)))
    }

    async fn list_registrations(&self) -> Result<Vec<RegistrationWithEvent>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        // insertion order breaks timestamp ties
        Ok(tables
            .registrations
            .iter()
            .rev()
            .filter_map(|r| join_registration(&tables, r))
            .collect())
    }

    async fn registrations_for_usn(&self, usn: &str) -> Result<Vec<RegistrationWithEvent>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .registrations
            .iter()
            .filter(|r| r.usn == usn)
            .filter_map(|r| join_registration(&tables, r))
            .collect())
    }

    async fn create_certificate(&self, request: CreateCertificateRequest) -> Result<Certificate> {
        self.check_available()?;
        let certificate = Certificate {
            id: request.id,
            student_name: request.student_name,
            usn: request.usn,
            event_id: request.event_id,
            issued_at: request.issued_at,
            certificate_url: request.certificate_url,
        };
        self.tables.write().await.certificates.push(certificate.clone());
        Ok(certificate)
    }

    async fn find_certificate(&self, id: Uuid) -> Result<Option<CertificateWithEvent>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .certificates
            .iter()
            .find(|c| c.id == id)
            .and_then(|c| join_certificate(&tables, c)))
    }

    async fn certificates_for_usn(&self, usn: &str) -> Result<Vec<CertificateWithEvent>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .certificates
            .iter()
            .filter(|c| c.usn == usn)
            .filter_map(|c| join_certificate(&tables, c))
            .collect())
    }

    async fn certificate_exists(&self, usn: &str, event_id: Uuid) -> Result<bool> {
        self.check_available()?;
        Ok(self
            .tables
            .read()
            .await
            .certificates
            .iter()
            .any(|c| c.usn == usn && c.event_id == event_id))
    }

    async fn has_role(&self, user_id: Uuid, role: Role) -> Result<bool> {
        self.check_available()?;
        Ok(self.tables.read().await.roles.contains(&(user_id, role)))
    }

    async fn grant_role(&self, user_id: Uuid, role: Role) -> Result<()> {
        self.check_available()?;
        self.tables.write().await.roles.insert((user_id, role));
        Ok(())
    }

    async fn log_activity(&self, request: CreateActivityRequest) -> Result<ActivityLog> {
        self.check_available()?;
        let entry = ActivityLog {
            id: self.next_activity_id.fetch_add(1, Ordering::SeqCst) + 1,
            user_id: request.user_id,
            activity_type: request.activity_type,
            description: request.description,
            created_at: Utc::now(),
        };
        self.tables.write().await.activity.push(entry.clone());
        Ok(entry)
    }

    async fn recent_activity(&self, limit: i64) -> Result<Vec<ActivityLog>> {
        self.check_available()?;
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(self
            .tables
            .read()
            .await
            .activity
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn counts(&self) -> Result<DashboardCounts> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(DashboardCounts {
            events: tables.events.len() as i64,
            registrations: tables.registrations.len() as i64,
            certificates: tables.certificates.len() as i64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn event_request(title: &str, status: EventStatus) -> CreateEventRequest {
        CreateEventRequest {
            title: title.to_string(),
            date: Utc::now() - Duration::days(3),
            description: None,
            location: Some("Seminar Hall".to_string()),
            capacity: Some(60),
            status: Some(status),
        }
    }

    #[tokio::test]
    async fn test_partial_event_update() {
        let store = MemoryStore::new();
        let event = store.create_event(event_request("Rust Workshop", EventStatus::Active)).await.unwrap();

        let updated = store
            .update_event(event.id, UpdateEventRequest {
                status: Some(EventStatus::Completed),
                ..Default::default()
            })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Rust Workshop");
        assert_eq!(updated.status(), Some(EventStatus::Completed));
        assert_eq!(updated.location.as_deref(), Some("Seminar Hall"));
        assert!(store.update_event(Uuid::new_v4(), UpdateEventRequest::default()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_registration_join_and_order() {
        let store = MemoryStore::new();
        let event = store.create_event(event_request("Hackathon", EventStatus::Planning)).await.unwrap();

        for usn in ["1AB21CS001", "1AB21CS002"] {
            store
                .create_registration(CreateRegistrationRequest {
                    event_id: event.id,
                    user_id: Uuid::new_v4(),
                    name: "Student".to_string(),
                    email: "s@example.com".to_string(),
                    usn: usn.to_string(),
                    department: "CSE".to_string(),
                    year: "1st Year".to_string(),
                })
                .await
                .unwrap();
        }

        let all = store.list_registrations().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].usn, "1AB21CS002");
        assert_eq!(all[0].event_title, "Hackathon");
        assert_eq!(all[0].event_status, "planning");

        let one = store.registrations_for_usn("1AB21CS001").await.unwrap();
        assert_eq!(one.len(), 1);
    }

    #[tokio::test]
    async fn test_roles_and_activity() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        assert!(!store.has_role(user, Role::Admin).await.unwrap());
        store.grant_role(user, Role::Admin).await.unwrap();
        store.grant_role(user, Role::Admin).await.unwrap();
        assert!(store.has_role(user, Role::Admin).await.unwrap());

        store.log_activity(CreateActivityRequest::new("a", "x", "first")).await.unwrap();
        store.log_activity(CreateActivityRequest::new("b", "y", "second")).await.unwrap();
        let recent = store.recent_activity(1).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].description, "second");
        assert_eq!(recent[0].id, 2);
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_call() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        assert!(store.list_events().await.is_err());
        assert!(store.counts().await.is_err());
        store.set_unavailable(false);
        assert_eq!(store.counts().await.unwrap(), DashboardCounts::default());
    }
}
