//! Test data
//!
//! Fixture values and request builders shared by the integration tests.

use chrono::{Duration, Utc};
use uuid::Uuid;
use ClubPortal::models::{CreateEventRequest, EventStatus, RegistrationForm};

pub const STUDENT_EMAIL: &str = "jane@example.com";
pub const STUDENT_USN: &str = "1AB21CS045";
pub const ADMIN_EMAIL: &str = "lead@club.example";
pub const ADMIN_PASSWORD: &str = "correct-horse";

pub fn event_request(title: &str, status: EventStatus) -> CreateEventRequest {
    CreateEventRequest {
        title: title.to_string(),
        date: Utc::now() - Duration::days(7),
        description: Some(format!("{} for club members", title)),
        location: Some("Seminar Hall".to_string()),
        capacity: Some(80),
        status: Some(status),
    }
}

pub fn registration_form(event_id: Uuid, usn: &str) -> RegistrationForm {
    RegistrationForm {
        name: "Jane Doe".to_string(),
        usn: usn.to_string(),
        email: STUDENT_EMAIL.to_string(),
        department: "Computer Science".to_string(),
        year: "3rd Year".to_string(),
        event_id: event_id.to_string(),
    }
}
