//! Error handling for ClubPortal
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

/// Per-field validation messages, keyed by form field name
pub type FieldErrors = BTreeMap<String, String>;

/// Main error type for ClubPortal application
#[derive(Error, Debug)]
pub enum ClubPortalError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Identity service error: {0}")]
    Identity(#[from] IdentityError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: Uuid },

    #[error("Registration not found: {registration_id}")]
    RegistrationNotFound { registration_id: Uuid },

    #[error("Certificate not found: {certificate_id}")]
    CertificateNotFound { certificate_id: Uuid },

    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("A submission is already in progress")]
    SubmissionInFlight,

    #[error("Certificate rendering failed: {0}")]
    Pdf(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Identity service specific errors
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("Identity service rejected the request: {0}")]
    Rejected(String),

    #[error("Identity service request failed: {0}")]
    RequestFailed(String),

    #[error("Identity service timeout")]
    Timeout,

    #[error("Invalid identity service response: {0}")]
    InvalidResponse(String),

    #[error("Identity service unavailable")]
    ServiceUnavailable,
}

/// Result type alias for ClubPortal operations
pub type Result<T> = std::result::Result<T, ClubPortalError>;

/// Result type alias for identity service operations
pub type IdentityResult<T> = std::result::Result<T, IdentityError>;

impl ClubPortalError {
    /// Build a validation error for a single field
    pub fn field(field: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), message.to_string());
        ClubPortalError::Validation(errors)
    }

    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            ClubPortalError::Database(_) => false,
            ClubPortalError::Migration(_) => false,
            ClubPortalError::Identity(IdentityError::InvalidCredentials) => false,
            ClubPortalError::Identity(IdentityError::Rejected(_)) => false,
            ClubPortalError::Identity(_) => true,
            ClubPortalError::Config(_) => false,
            ClubPortalError::AccessDenied(_) => false,
            ClubPortalError::EventNotFound { .. } => false,
            ClubPortalError::RegistrationNotFound { .. } => false,
            ClubPortalError::CertificateNotFound { .. } => false,
            ClubPortalError::Validation(_) => false,
            ClubPortalError::Redis(_) => true,
            ClubPortalError::Http(_) => true,
            ClubPortalError::Serialization(_) => false,
            ClubPortalError::Io(_) => true,
            ClubPortalError::UrlParse(_) => false,
            ClubPortalError::Authentication(_) => false,
            ClubPortalError::RateLimitExceeded => true,
            ClubPortalError::SubmissionInFlight => true,
            ClubPortalError::Pdf(_) => false,
            ClubPortalError::ServiceUnavailable(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ClubPortalError::Database(_) => ErrorSeverity::Critical,
            ClubPortalError::Migration(_) => ErrorSeverity::Critical,
            ClubPortalError::Config(_) => ErrorSeverity::Critical,
            ClubPortalError::AccessDenied(_) => ErrorSeverity::Warning,
            ClubPortalError::Authentication(_) => ErrorSeverity::Warning,
            ClubPortalError::Identity(IdentityError::InvalidCredentials) => ErrorSeverity::Warning,
            ClubPortalError::Identity(IdentityError::Rejected(_)) => ErrorSeverity::Info,
            ClubPortalError::RateLimitExceeded => ErrorSeverity::Warning,
            ClubPortalError::SubmissionInFlight => ErrorSeverity::Info,
            ClubPortalError::Validation(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
