//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod certificate;
pub mod dashboard;
pub mod event;
pub mod identity;
pub mod pdf;
pub mod registration;

// Re-export commonly used services
pub use auth::{AuthService, SignUpOutcome};
pub use certificate::{CertificateDownload, CertificateService};
pub use dashboard::DashboardService;
pub use event::EventService;
pub use identity::{AuthSession, AuthUser, GoTrueClient, IdentityProvider, SignUpResult};
pub use registration::RegistrationService;

use std::sync::Arc;

use serde::Serialize;

use crate::config::settings::Settings;
use crate::database::ClubStore;
use crate::middleware::LoginThrottle;
use crate::session::SessionManager;

/// Service factory for creating and managing all services
#[derive(Clone, Debug)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub registration_service: RegistrationService,
    pub certificate_service: CertificateService,
    pub event_service: EventService,
    pub dashboard_service: DashboardService,
    store: Arc<dyn ClubStore>,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(
        settings: &Settings,
        store: Arc<dyn ClubStore>,
        identity: Arc<dyn IdentityProvider>,
        sessions: SessionManager,
    ) -> Self {
        let throttle = LoginThrottle::new(&settings.rate_limit);

        Self {
            auth_service: AuthService::new(
                Arc::clone(&store),
                identity,
                sessions,
                throttle,
                settings.auth.clone(),
            ),
            registration_service: RegistrationService::new(Arc::clone(&store)),
            certificate_service: CertificateService::new(Arc::clone(&store), settings.certificates.clone()),
            event_service: EventService::new(Arc::clone(&store)),
            dashboard_service: DashboardService::new(Arc::clone(&store)),
            store,
        }
    }

    pub fn sessions(&self) -> &SessionManager {
        self.auth_service.sessions()
    }

    pub fn login_throttle(&self) -> &LoginThrottle {
        self.auth_service.throttle()
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let store_healthy = self.store.counts().await.is_ok();

        ServiceHealthStatus {
            store_healthy,
            session_subscribers: self.sessions().subscriber_count(),
        }
    }
}

/// Service health status
#[derive(Debug, Clone, Serialize)]
pub struct ServiceHealthStatus {
    pub store_healthy: bool,
    pub session_subscribers: usize,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.store_healthy
    }
}
