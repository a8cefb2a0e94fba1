//! Registration form handler

use axum::extract::State;
use axum::response::Response;
use axum::Json;

use crate::middleware::MaybeSession;
use crate::models::RegistrationForm;
use crate::routes::AppState;
use crate::utils::errors::Result;
use crate::utils::response::created;

pub async fn submit_registration(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
    Json(form): Json<RegistrationForm>,
) -> Result<Response> {
    let receipt = state
        .services
        .registration_service
        .register(session.as_ref(), &form)
        .await?;
    Ok(created(receipt, "You have successfully registered for the event."))
}
