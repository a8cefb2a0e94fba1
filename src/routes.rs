//! Router and shared application state

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::handlers::{admin, auth, certificates, events, health, registrations};
use crate::middleware::create_cors_layer;
use crate::services::ServiceFactory;

/// State shared by every handler
#[derive(Clone, Debug)]
pub struct AppState {
    pub services: ServiceFactory,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(services: ServiceFactory, settings: Settings) -> Self {
        Self {
            services,
            settings: Arc::new(settings),
        }
    }
}

pub fn create_routes(state: AppState) -> Router {
    let cors = create_cors_layer(&state.settings.server);

    let admin_routes = Router::new()
        .route("/login", post(auth::admin_login))
        .route("/registrations", get(admin::list_registrations))
        .route("/registrations/:id/verify", post(admin::verify_registration))
        .route("/registrations/:id/certificate", get(admin::registration_certificate))
        .route("/events", post(events::create_event))
        .route("/events/:id", put(events::update_event))
        .route("/activity", get(admin::recent_activity))
        .route("/stats", get(admin::stats))
        .route("/users/:id/roles", post(admin::grant_role));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/events", get(events::list_events))
        .route("/auth/sign-up", post(auth::sign_up))
        .route("/auth/sign-in", post(auth::sign_in))
        .route("/auth/sign-out", post(auth::sign_out))
        .route("/auth/session", get(auth::current_session))
        .route("/registrations", post(registrations::submit_registration))
        .route("/certificates", get(certificates::lookup_certificates))
        .route("/certificates/:id/pdf", get(certificates::download_certificate))
        .nest("/admin", admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
