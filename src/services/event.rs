//! Event management service

use std::sync::Arc;

use uuid::Uuid;

use crate::database::ClubStore;
use crate::models::{activity_types, CreateActivityRequest, CreateEventRequest, Event, Identity, UpdateEventRequest};
use crate::utils::errors::{ClubPortalError, FieldErrors, Result};
use crate::utils::logging::log_admin_action;

#[derive(Clone)]
pub struct EventService {
    store: Arc<dyn ClubStore>,
}

impl EventService {
    pub fn new(store: Arc<dyn ClubStore>) -> Self {
        Self { store }
    }

    /// Events ordered by date, for the registration form's event picker
    pub async fn list(&self) -> Result<Vec<Event>> {
        self.store.list_events().await
    }

    pub async fn create(&self, admin: &Identity, mut request: CreateEventRequest) -> Result<Event> {
        request.title = request.title.trim().to_string();
        check_event_fields(Some(&request.title), request.capacity)?;

        let event = self.store.create_event(request).await?;
        self.record(admin, activity_types::EVENT_CREATED, &event, "Created event").await?;
        Ok(event)
    }

    /// Partial update; absent fields keep their stored values
    pub async fn update(&self, admin: &Identity, event_id: Uuid, mut request: UpdateEventRequest) -> Result<Event> {
        if let Some(title) = request.title.as_mut() {
            *title = title.trim().to_string();
        }
        check_event_fields(request.title.as_deref(), request.capacity)?;

        let event = self
            .store
            .update_event(event_id, request)
            .await?
            .ok_or(ClubPortalError::EventNotFound { event_id })?;
        self.record(admin, activity_types::EVENT_UPDATED, &event, "Updated event").await?;
        Ok(event)
    }

    async fn record(&self, admin: &Identity, activity_type: &str, event: &Event, verb: &str) -> Result<()> {
        self.store
            .log_activity(CreateActivityRequest::new(
                admin.subject(),
                activity_type,
                format!("{} {}", verb, event.title),
            ))
            .await?;
        log_admin_action(&admin.subject(), activity_type, Some(&event.id.to_string()), Some(&event.title));
        Ok(())
    }
}

fn check_event_fields(title: Option<&str>, capacity: Option<i32>) -> Result<()> {
    let mut errors = FieldErrors::new();
    if title.is_some_and(str::is_empty) {
        errors.insert("title".into(), "Title is required".into());
    }
    if capacity.is_some_and(|c| c < 0) {
        errors.insert("capacity".into(), "Capacity cannot be negative".into());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ClubPortalError::Validation(errors))
    }
}

impl std::fmt::Debug for EventService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventService").finish_non_exhaustive()
    }
}
