//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod event;
pub mod registration;
pub mod certificate;
pub mod role;
pub mod activity;

// Re-export repositories
pub use event::EventRepository;
pub use registration::RegistrationRepository;
pub use certificate::CertificateRepository;
pub use role::RoleRepository;
pub use activity::ActivityRepository;
