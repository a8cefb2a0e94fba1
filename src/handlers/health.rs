//! Health check handler

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use serde::Serialize;

use crate::routes::AppState;
use crate::utils::response::{error, success};

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    session_subscribers: usize,
}

pub async fn health_check(State(state): State<AppState>) -> Response {
    let health = state.services.health_check().await;

    if !health.is_healthy() {
        return error(
            "SERVICE_UNAVAILABLE",
            "The data store is unreachable",
            None,
            StatusCode::SERVICE_UNAVAILABLE,
        );
    }

    let payload = HealthPayload {
        status: "ok",
        service: "clubportal-api",
        version: crate::VERSION,
        session_subscribers: health.session_subscribers,
    };
    success(payload, "Health check successful")
}
