//! Session lifecycle
//!
//! The [`SessionManager`] is the single holder of authentication state. It
//! issues bearer tokens, resolves them back to an [`Identity`], ends
//! sessions and broadcasts every change to subscribers.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

use super::{Session, SessionStorage};
use crate::models::Identity;
use crate::utils::errors::{ClubPortalError, Result};
use crate::utils::helpers::generate_random_string;

const TOKEN_LENGTH: usize = 48;
const EVENT_CAPACITY: usize = 64;

/// Authentication state change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AuthEvent {
    SignedIn { subject: String, is_admin: bool },
    SignedOut { subject: String },
}

/// Receiver half of the auth event channel; unsubscribes when dropped
#[derive(Debug)]
pub struct AuthSubscription {
    receiver: broadcast::Receiver<AuthEvent>,
}

impl AuthSubscription {
    /// Next event, skipping any the subscriber was too slow to see.
    /// `None` once the manager is gone.
    pub async fn recv(&mut self) -> Option<AuthEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "Auth subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    pub fn try_recv(&mut self) -> Option<AuthEvent> {
        self.receiver.try_recv().ok()
    }
}

#[derive(Clone)]
pub struct SessionManager {
    storage: Arc<dyn SessionStorage>,
    events: broadcast::Sender<AuthEvent>,
    ttl: Duration,
}

impl SessionManager {
    /// Fails when `ttl_seconds` does not fit a signed duration
    pub fn new(storage: Arc<dyn SessionStorage>, ttl_seconds: u64) -> Result<Self> {
        let ttl = i64::try_from(ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| ClubPortalError::Config(format!("Session TTL out of range: {}s", ttl_seconds)))?;

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Ok(Self { storage, events, ttl })
    }

    /// Store a new session for `identity` and announce the sign in
    pub async fn establish(&self, identity: Identity, access_token: Option<String>) -> Result<Session> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| ClubPortalError::Config("Session expiry is out of range".to_string()))?;
        let session = Session {
            token: generate_random_string(TOKEN_LENGTH),
            identity,
            access_token,
            created_at: now,
            expires_at,
        };

        self.storage.save(&session).await?;
        self.publish(AuthEvent::SignedIn {
            subject: session.identity.subject(),
            is_admin: session.identity.is_admin(),
        });

        Ok(session)
    }

    /// Restore the session behind a bearer token; expired sessions are
    /// removed and reported as absent
    pub async fn resolve(&self, token: &str) -> Result<Option<Session>> {
        let Some(session) = self.storage.load(token).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            debug!(subject = %session.identity.subject(), "Session expired, removing");
            self.storage.delete(token).await?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Remove a session; the removed session is returned so callers can
    /// revoke any remote counterpart
    pub async fn end(&self, token: &str) -> Result<Option<Session>> {
        let session = self.storage.load(token).await?;
        self.storage.delete(token).await?;

        if let Some(session) = &session {
            self.publish(AuthEvent::SignedOut {
                subject: session.identity.subject(),
            });
        }

        Ok(session)
    }

    pub fn subscribe(&self) -> AuthSubscription {
        AuthSubscription {
            receiver: self.events.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }

    fn publish(&self, event: AuthEvent) {
        // no subscribers is not an error
        let _ = self.events.send(event);
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("ttl", &self.ttl)
            .field("subscribers", &self.events.receiver_count())
            .finish_non_exhaustive()
    }
}
