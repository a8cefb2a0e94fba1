//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod event;
pub mod registration;
pub mod certificate;
pub mod role;
pub mod activity;
pub mod identity;

// Re-export commonly used models
pub use event::{Event, EventStatus, CreateEventRequest, UpdateEventRequest};
pub use registration::{
    Registration, RegistrationWithEvent, CreateRegistrationRequest, RegistrationForm,
    RegistrationReceipt, AdminRegistrationView,
};
pub use certificate::{Certificate, CertificateWithEvent, CreateCertificateRequest, CertificateView};
pub use role::Role;
pub use activity::{ActivityLog, CreateActivityRequest, DashboardCounts, activity_types};
pub use identity::{Identity, RemoteUser, LocalAdmin};
