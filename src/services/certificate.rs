//! Certificate service
//!
//! Student lookup-or-generate, admin verification and PDF downloads.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use futures::future::try_join_all;
use tracing::{debug, error};
use uuid::Uuid;

use crate::config::CertificateConfig;
use crate::database::ClubStore;
use crate::models::*;
use crate::services::pdf::render_certificate;
use crate::utils::errors::{ClubPortalError, Result};
use crate::utils::helpers::{certificate_file_name, format_display_date, generate_uuid, normalize_usn, sanitize_filename};
use crate::utils::logging::{log_admin_action, log_certificate_issued};

/// A rendered certificate ready to be sent as a download
#[derive(Debug, Clone)]
pub struct CertificateDownload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct CertificateService {
    store: Arc<dyn ClubStore>,
    config: CertificateConfig,
}

impl CertificateService {
    pub fn new(store: Arc<dyn ClubStore>, config: CertificateConfig) -> Self {
        Self { store, config }
    }

    /// Find a student's certificates, issuing them for completed events on
    /// the first lookup.
    ///
    /// Existing certificates win: once any exist for the USN they are
    /// returned as-is and no new ones are generated. Any store failure aborts
    /// the lookup; certificates inserted before the failure stay in place.
    pub async fn lookup(&self, usn: &str) -> Result<Vec<CertificateView>> {
        let usn = normalize_usn(usn);
        if usn.is_empty() {
            return Err(ClubPortalError::field("usn", "USN is required"));
        }

        self.lookup_or_generate(&usn).await.map_err(|e| match e {
            ClubPortalError::Validation(_) => e,
            other => {
                error!(usn = %usn, error = %other, "Certificate lookup failed");
                ClubPortalError::ServiceUnavailable("certificate lookup failed".to_string())
            }
        })
    }

    async fn lookup_or_generate(&self, usn: &str) -> Result<Vec<CertificateView>> {
        let existing = self.store.certificates_for_usn(usn).await?;
        if !existing.is_empty() {
            debug!(usn = %usn, count = existing.len(), "Returning existing certificates");
            return Ok(existing.iter().map(|c| self.view(c)).collect());
        }

        let registrations = self.store.registrations_for_usn(usn).await?;
        let mut issued_events = HashSet::new();
        let mut generated = Vec::new();

        for registration in registrations {
            if registration.event_status != EventStatus::Completed.as_str() {
                continue;
            }
            if !issued_events.insert(registration.event_id) {
                continue;
            }

            let certificate = self.issue(&registration).await?;
            log_certificate_issued(certificate.id, certificate.event_id, &certificate.usn, "lookup");
            generated.push(with_event(certificate, &registration));
        }

        Ok(generated.iter().map(|c| self.view(c)).collect())
    }

    /// Issue a certificate for a registration and return the refreshed
    /// admin registration list
    pub async fn verify(&self, registration_id: Uuid, admin: &Identity) -> Result<Vec<AdminRegistrationView>> {
        let registration = self
            .store
            .find_registration(registration_id)
            .await?
            .ok_or(ClubPortalError::RegistrationNotFound { registration_id })?;

        let certificate = self.issue(&registration).await?;

        self.store
            .log_activity(CreateActivityRequest::new(
                admin.subject(),
                activity_types::CERTIFICATE_ISSUED,
                format!("Certificate has been issued to {}", registration.name),
            ))
            .await?;

        log_certificate_issued(certificate.id, certificate.event_id, &certificate.usn, "admin");
        log_admin_action(
            &admin.subject(),
            "verify_registration",
            Some(&registration_id.to_string()),
            Some(&format!("certificate {}", certificate.id)),
        );

        self.admin_registrations().await
    }

    /// All registrations, newest first, with whether a certificate exists
    /// for each (usn, event) pair
    pub async fn admin_registrations(&self) -> Result<Vec<AdminRegistrationView>> {
        let registrations = self.store.list_registrations().await?;

        let checks = registrations
            .iter()
            .map(|r| self.store.certificate_exists(&r.usn, r.event_id));
        let verified = try_join_all(checks).await?;

        Ok(registrations
            .into_iter()
            .zip(verified)
            .map(|(registration, verified)| AdminRegistrationView { registration, verified })
            .collect())
    }

    /// Render a stored certificate
    pub async fn download(&self, certificate_id: Uuid) -> Result<CertificateDownload> {
        let certificate = self
            .store
            .find_certificate(certificate_id)
            .await?
            .ok_or(ClubPortalError::CertificateNotFound { certificate_id })?;

        let view = self.view(&certificate);
        Ok(CertificateDownload {
            file_name: view.certificate_url.clone(),
            bytes: render_certificate(&view)?,
        })
    }

    /// Render a certificate for a registration without storing anything
    pub async fn download_for_registration(&self, registration_id: Uuid) -> Result<CertificateDownload> {
        let registration = self
            .store
            .find_registration(registration_id)
            .await?
            .ok_or(ClubPortalError::RegistrationNotFound { registration_id })?;

        let view = CertificateView {
            id: generate_uuid(),
            event_name: registration.event_title.clone(),
            date: format_display_date(registration.event_date, &self.config.date_format),
            student_name: registration.name.clone(),
            usn: registration.usn.clone(),
            certificate_url: String::new(),
        };

        Ok(CertificateDownload {
            file_name: sanitize_filename(&format!(
                "{}-{}-certificate.pdf",
                registration.name, registration.event_title
            )),
            bytes: render_certificate(&view)?,
        })
    }

    async fn issue(&self, registration: &RegistrationWithEvent) -> Result<Certificate> {
        let id = generate_uuid();
        self.store
            .create_certificate(CreateCertificateRequest {
                id,
                student_name: registration.name.clone(),
                usn: registration.usn.clone(),
                event_id: registration.event_id,
                issued_at: Utc::now(),
                certificate_url: certificate_file_name(id),
            })
            .await
    }

    fn view(&self, certificate: &CertificateWithEvent) -> CertificateView {
        CertificateView {
            id: certificate.id,
            event_name: certificate.event_title.clone(),
            date: format_display_date(certificate.event_date, &self.config.date_format),
            student_name: certificate.student_name.clone(),
            usn: certificate.usn.clone(),
            certificate_url: certificate.certificate_url.clone(),
        }
    }
}

fn with_event(certificate: Certificate, registration: &RegistrationWithEvent) -> CertificateWithEvent {
    CertificateWithEvent {
        id: certificate.id,
        student_name: certificate.student_name,
        usn: certificate.usn,
        event_id: certificate.event_id,
        issued_at: certificate.issued_at,
        certificate_url: certificate.certificate_url,
        event_title: registration.event_title.clone(),
        event_date: registration.event_date,
    }
}

impl std::fmt::Debug for CertificateService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CertificateService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
