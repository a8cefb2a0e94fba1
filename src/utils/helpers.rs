//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new UUID v4
pub fn generate_uuid() -> Uuid {
    Uuid::new_v4()
}

/// File name under which a certificate PDF is published
pub fn certificate_file_name(certificate_id: Uuid) -> String {
    format!("certificate-{}.pdf", certificate_id)
}

/// Identifier for a locally issued admin identity
pub fn local_admin_id(now: DateTime<Utc>) -> String {
    format!("admin-{}", now.timestamp_millis())
}

/// Format a date for certificates and lists, e.g. "March 10, 2025"
pub fn format_display_date(timestamp: DateTime<Utc>, format: &str) -> String {
    timestamp.format(format).to_string()
}

/// Normalize a University Seat Number for storage and lookup
pub fn normalize_usn(usn: &str) -> String {
    usn.trim().to_uppercase()
}

/// Sanitize filename for safe storage
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Generate a random alphanumeric string
pub fn generate_random_string(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                            abcdefghijklmnopqrstuvwxyz\
                            0123456789";
    let mut rng = rand::thread_rng();

    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_certificate_file_name() {
        let id = Uuid::nil();
        assert_eq!(
            certificate_file_name(id),
            "certificate-00000000-0000-0000-0000-000000000000.pdf"
        );
    }

    #[test]
    fn test_format_display_date() {
        let date = Utc.with_ymd_and_hms(2025, 3, 10, 9, 30, 0).unwrap();
        assert_eq!(format_display_date(date, "%B %-d, %Y"), "March 10, 2025");
    }

    #[test]
    fn test_local_admin_id() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(local_admin_id(now), "admin-1700000000123");
    }

    #[test]
    fn test_normalize_usn() {
        assert_eq!(normalize_usn("  1ab21cs045 "), "1AB21CS045");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Jane Doe/cert.pdf"), "Jane_Doe_cert.pdf");
    }

    #[test]
    fn test_random_string_length() {
        let token = generate_random_string(48);
        assert_eq!(token.len(), 48);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
