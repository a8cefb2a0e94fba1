//! ClubPortal
//!
//! Backend for a university technical club: event registrations,
//! certificate lookup and issuance, and the admin dashboard, served as a
//! JSON HTTP API.

#![allow(non_snake_case)]

pub mod config;
pub mod database;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ClubPortalError, Result};

// Re-export main components for easy access
pub use database::{ClubStore, DatabaseService, MemoryStore};
pub use routes::{create_routes, AppState};
pub use services::ServiceFactory;
pub use session::SessionManager;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
