//! Admin dashboard handlers

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::handlers::certificates::pdf_response;
use crate::middleware::AdminSession;
use crate::models::Role;
use crate::routes::AppState;
use crate::utils::errors::Result;
use crate::utils::response::{empty_success, success};

pub async fn list_registrations(State(state): State<AppState>, _admin: AdminSession) -> Result<Response> {
    let registrations = state.services.certificate_service.admin_registrations().await?;
    Ok(success(registrations, "Registrations retrieved"))
}

pub async fn verify_registration(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Path(registration_id): Path<Uuid>,
) -> Result<Response> {
    let registrations = state
        .services
        .certificate_service
        .verify(registration_id, &session.identity)
        .await?;
    Ok(success(registrations, "Certificate has been issued"))
}

pub async fn registration_certificate(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(registration_id): Path<Uuid>,
) -> Result<Response> {
    let download = state
        .services
        .certificate_service
        .download_for_registration(registration_id)
        .await?;
    Ok(pdf_response(download))
}

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<i64>,
}

pub async fn recent_activity(
    State(state): State<AppState>,
    _admin: AdminSession,
    Query(query): Query<ActivityQuery>,
) -> Result<Response> {
    let activity = state.services.dashboard_service.recent_activity(query.limit).await?;
    Ok(success(activity, "Activity retrieved"))
}

pub async fn stats(State(state): State<AppState>, _admin: AdminSession) -> Result<Response> {
    let counts = state.services.dashboard_service.counts().await?;
    Ok(success(counts, "Statistics retrieved"))
}

#[derive(Debug, Deserialize)]
pub struct GrantRoleRequest {
    pub role: Role,
}

pub async fn grant_role(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Path(user_id): Path<Uuid>,
    Json(request): Json<GrantRoleRequest>,
) -> Result<Response> {
    state
        .services
        .dashboard_service
        .grant_role(&session.identity, user_id, request.role)
        .await?;
    Ok(empty_success(format!("Granted {} role", request.role)))
}
