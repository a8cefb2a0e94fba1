//! Authenticated identity model
//!
//! A caller is either a user authenticated by the remote identity service or
//! an admin identity issued locally under the allow-list login policy. Both
//! shapes are carried as one [`Identity`] value and queried through
//! capability methods instead of inspecting the variant at every call site.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteUser {
    pub id: Uuid,
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalAdmin {
    pub id: String,
    pub email: String,
    pub username: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Identity {
    RemoteUser(RemoteUser),
    LocalAdmin(LocalAdmin),
}

impl Identity {
    /// Whether this identity may use the admin dashboard
    pub fn is_admin(&self) -> bool {
        match self {
            Identity::RemoteUser(user) => user.roles.contains(&Role::Admin),
            Identity::LocalAdmin(admin) => admin.is_admin,
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            Identity::RemoteUser(user) => user.email.as_deref(),
            Identity::LocalAdmin(admin) => Some(admin.email.as_str()),
        }
    }

    /// Identifier recorded in activity logs
    pub fn subject(&self) -> String {
        match self {
            Identity::RemoteUser(user) => user.id.to_string(),
            Identity::LocalAdmin(admin) => admin.id.clone(),
        }
    }

    /// Remote user id, when the identity is backed by the identity service
    pub fn remote_id(&self) -> Option<Uuid> {
        match self {
            Identity::RemoteUser(user) => Some(user.id),
            Identity::LocalAdmin(_) => None,
        }
    }
}
