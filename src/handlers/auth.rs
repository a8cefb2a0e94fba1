//! Authentication handlers

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::middleware::auth::bearer_token;
use crate::middleware::CurrentSession;
use crate::models::Identity;
use crate::routes::AppState;
use crate::services::AuthUser;
use crate::session::Session;
use crate::utils::errors::Result;
use crate::utils::response::{created, empty_success, success};

#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Session as returned to clients; the remote access token stays server side
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub token: String,
    pub identity: Identity,
    pub is_admin: bool,
    pub expires_at: DateTime<Utc>,
}

impl From<Session> for SessionView {
    fn from(session: Session) -> Self {
        Self {
            is_admin: session.identity.is_admin(),
            token: session.token,
            identity: session.identity,
            expires_at: session.expires_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SignUpView {
    pub user: AuthUser,
    pub session: Option<SessionView>,
}

pub async fn sign_up(State(state): State<AppState>, Json(credentials): Json<Credentials>) -> Result<Response> {
    let outcome = state
        .services
        .auth_service
        .sign_up(&credentials.email, &credentials.password)
        .await?;

    let message = if outcome.session.is_some() {
        "Account created"
    } else {
        "Account created, check your email to confirm it"
    };
    let view = SignUpView {
        user: outcome.user,
        session: outcome.session.map(SessionView::from),
    };
    Ok(created(view, message))
}

pub async fn sign_in(State(state): State<AppState>, Json(credentials): Json<Credentials>) -> Result<Response> {
    let session = state
        .services
        .auth_service
        .sign_in(&credentials.email, &credentials.password)
        .await?;
    Ok(success(SessionView::from(session), "Signed in"))
}

pub async fn sign_out(State(state): State<AppState>, headers: HeaderMap) -> Result<Response> {
    if let Some(token) = bearer_token(&headers) {
        state.services.auth_service.sign_out(&token).await?;
    }
    Ok(empty_success("Signed out"))
}

pub async fn current_session(CurrentSession(session): CurrentSession) -> Response {
    success(SessionView::from(session), "Session is active")
}

pub async fn admin_login(State(state): State<AppState>, Json(credentials): Json<Credentials>) -> Result<Response> {
    let session = state
        .services
        .auth_service
        .admin_login(&credentials.email, &credentials.password)
        .await?;
    Ok(success(SessionView::from(session), "Redirecting to administrator dashboard."))
}
