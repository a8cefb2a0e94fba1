//! Form validation
//!
//! Field checks run locally and block a submission before any store or
//! identity service call is made. Each failing field gets one message.

use std::sync::OnceLock;

use regex::Regex;
use uuid::Uuid;

use crate::models::RegistrationForm;
use crate::utils::errors::{ClubPortalError, FieldErrors, Result};
use crate::utils::helpers::{normalize_usn, normalize_whitespace};

fn usn_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // digit, 2 alphanumerics, 2 digits, 2 alphanumerics, 3 digits
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9][A-Za-z0-9]{2}[0-9]{2}[A-Za-z0-9]{2}[0-9]{3}$").expect("valid USN pattern")
    })
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"))
}

/// Whether `usn` is a well-formed University Seat Number (case-insensitive)
pub fn is_valid_usn(usn: &str) -> bool {
    usn_pattern().is_match(usn.trim())
}

/// Whether `email` has a local part, an `@` and a dotted domain
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email.trim())
}

/// A registration form that passed validation, with values normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    pub name: String,
    pub usn: String,
    pub email: String,
    pub department: String,
    pub year: String,
    pub event_id: Uuid,
}

/// Validate the event registration form
pub fn validate_registration(form: &RegistrationForm) -> Result<ValidRegistration> {
    let mut errors = FieldErrors::new();

    if form.name.trim().is_empty() {
        errors.insert("name".into(), "Name is required".into());
    }

    if form.usn.trim().is_empty() {
        errors.insert("usn".into(), "USN is required".into());
    } else if !is_valid_usn(&form.usn) {
        errors.insert("usn".into(), "USN format not valid".into());
    }

    check_email(&form.email, &mut errors);

    if form.department.is_empty() {
        errors.insert("department".into(), "Department is required".into());
    }

    if form.year.is_empty() {
        errors.insert("year".into(), "Year is required".into());
    }

    let event_id = if form.event_id.trim().is_empty() {
        errors.insert("eventId".into(), "Event selection is required".into());
        None
    } else {
        match Uuid::parse_str(form.event_id.trim()) {
            Ok(id) => Some(id),
            Err(_) => {
                errors.insert("eventId".into(), "Event selection is not valid".into());
                None
            }
        }
    };

    match event_id {
        Some(event_id) if errors.is_empty() => Ok(ValidRegistration {
            name: normalize_whitespace(&form.name),
            usn: normalize_usn(&form.usn),
            email: form.email.trim().to_string(),
            department: form.department.clone(),
            year: form.year.clone(),
            event_id,
        }),
        _ => Err(ClubPortalError::Validation(errors)),
    }
}

/// Validate login credentials; returns the trimmed email
pub fn validate_credentials(email: &str, password: &str) -> Result<String> {
    let mut errors = FieldErrors::new();
    check_email(email, &mut errors);

    if password.is_empty() {
        errors.insert("password".into(), "Password is required".into());
    }

    if errors.is_empty() {
        Ok(email.trim().to_string())
    } else {
        Err(ClubPortalError::Validation(errors))
    }
}

fn check_email(email: &str, errors: &mut FieldErrors) {
    if email.trim().is_empty() {
        errors.insert("email".into(), "Email is required".into());
    } else if !is_valid_email(email) {
        errors.insert("email".into(), "Email format not valid".into());
    }
}
