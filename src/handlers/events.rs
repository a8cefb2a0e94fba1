//! Event handlers

use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use uuid::Uuid;

use crate::middleware::AdminSession;
use crate::models::{CreateEventRequest, UpdateEventRequest};
use crate::routes::AppState;
use crate::utils::errors::Result;
use crate::utils::response::{created, success};

pub async fn list_events(State(state): State<AppState>) -> Result<Response> {
    let events = state.services.event_service.list().await?;
    Ok(success(events, "Events retrieved"))
}

pub async fn create_event(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Json(request): Json<CreateEventRequest>,
) -> Result<Response> {
    let event = state
        .services
        .event_service
        .create(&session.identity, request)
        .await?;
    Ok(created(event, "The event has been successfully created."))
}

pub async fn update_event(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Path(event_id): Path<Uuid>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<Response> {
    let event = state
        .services
        .event_service
        .update(&session.identity, event_id, request)
        .await?;
    Ok(success(event, "The event has been successfully updated."))
}
