//! Database module
//!
//! This module handles database connections and operations

pub mod connection;
pub mod repositories;
pub mod service;
pub mod store;
pub mod memory;

// Re-export commonly used database components
pub use connection::{DatabasePool, DatabaseConfig, create_pool, run_migrations, health_check};
pub use repositories::{
    EventRepository, RegistrationRepository, CertificateRepository, RoleRepository, ActivityRepository,
};
pub use service::DatabaseService;
pub use store::ClubStore;
pub use memory::MemoryStore;
