//! Session module
//!
//! Authentication state: bearer-token sessions holding an [`Identity`],
//! their storage, and auth state change notifications.

pub mod manager;
pub mod storage;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Identity;

pub use manager::{AuthEvent, AuthSubscription, SessionManager};
pub use storage::{MemorySessionStorage, RedisSessionStorage, SessionStorage};

/// A signed in identity behind an opaque bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub identity: Identity,
    /// Remote identity service token, absent for local admins
    pub access_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}
