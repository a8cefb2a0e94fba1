//! Event registration service

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::database::ClubStore;
use crate::models::{activity_types, CreateActivityRequest, CreateRegistrationRequest, RegistrationForm, RegistrationReceipt};
use crate::session::Session;
use crate::utils::errors::{ClubPortalError, Result};
use crate::utils::helpers::generate_uuid;
use crate::utils::logging::log_registration;
use crate::validation::validate_registration;

pub const LOGIN_REQUIRED: &str = "Please log in before registering for events.";

/// Sessions with a registration currently being submitted
#[derive(Debug, Clone, Default)]
struct InFlight {
    tokens: Arc<Mutex<HashSet<String>>>,
}

#[derive(Debug)]
struct InFlightGuard {
    tokens: Arc<Mutex<HashSet<String>>>,
    token: String,
}

impl InFlight {
    fn acquire(&self, token: &str) -> Result<InFlightGuard> {
        let mut tokens = self.tokens.lock().unwrap_or_else(|e| e.into_inner());
        if !tokens.insert(token.to_string()) {
            return Err(ClubPortalError::SubmissionInFlight);
        }
        Ok(InFlightGuard {
            tokens: Arc::clone(&self.tokens),
            token: token.to_string(),
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.tokens
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.token);
    }
}

#[derive(Clone)]
pub struct RegistrationService {
    store: Arc<dyn ClubStore>,
    in_flight: InFlight,
}

impl RegistrationService {
    pub fn new(store: Arc<dyn ClubStore>) -> Self {
        Self {
            store,
            in_flight: InFlight::default(),
        }
    }

    /// Validate and submit a registration form.
    ///
    /// Validation runs before the session check so field errors are reported
    /// to signed out visitors too. Admins register on a student's behalf,
    /// so their rows get a fresh user id.
    pub async fn register(&self, session: Option<&Session>, form: &RegistrationForm) -> Result<RegistrationReceipt> {
        let valid = validate_registration(form)?;

        let session = session.ok_or_else(|| ClubPortalError::Authentication(LOGIN_REQUIRED.to_string()))?;
        let _guard = self.in_flight.acquire(&session.token)?;

        if self.store.find_event(valid.event_id).await?.is_none() {
            return Err(ClubPortalError::EventNotFound { event_id: valid.event_id });
        }

        let user_id = match session.identity.remote_id() {
            Some(id) if !session.identity.is_admin() => id,
            _ => generate_uuid(),
        };

        let registration = self
            .store
            .create_registration(CreateRegistrationRequest {
                event_id: valid.event_id,
                user_id,
                name: valid.name,
                email: valid.email,
                usn: valid.usn,
                department: valid.department,
                year: valid.year,
            })
            .await
            .map_err(|e| {
                warn!(error = %e, "Registration insert failed");
                e
            })?;

        self.store
            .log_activity(CreateActivityRequest::new(
                user_id.to_string(),
                activity_types::EVENT_REGISTRATION,
                "Registered for event",
            ))
            .await?;

        log_registration(registration.id, registration.event_id, user_id, &registration.usn);

        Ok(RegistrationReceipt {
            registration,
            next_form: RegistrationForm::reset_with_email(session.identity.email()),
        })
    }
}

impl std::fmt::Debug for RegistrationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_in_flight_guard_releases_on_drop() {
        let in_flight = InFlight::default();
        let guard = in_flight.acquire("token").unwrap();
        assert_matches!(in_flight.acquire("token"), Err(ClubPortalError::SubmissionInFlight));
        assert!(in_flight.acquire("other").is_ok());
        drop(guard);
        assert!(in_flight.acquire("token").is_ok());
    }
}
