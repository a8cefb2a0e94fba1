//! Authentication extractors
//!
//! Handlers declare the session they need as an argument. Sessions are
//! resolved from the `Authorization: Bearer <token>` header through the
//! [`SessionManager`](crate::session::SessionManager) held in the app state.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use tracing::{debug, warn};

use crate::routes::AppState;
use crate::services::auth::ADMIN_REQUIRED;
use crate::session::Session;
use crate::utils::errors::ClubPortalError;

const AUTH_REQUIRED: &str = "Authentication required";

/// Bearer token from the request, if any
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ").or_else(|| value.strip_prefix("bearer "))?;
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

async fn resolve(parts: &Parts, state: &AppState) -> Result<Option<Session>, ClubPortalError> {
    let Some(token) = bearer_token(&parts.headers) else {
        return Ok(None);
    };
    let session = state.services.sessions().resolve(&token).await?;
    if session.is_none() {
        debug!("Bearer token does not match a live session");
    }
    Ok(session)
}

/// Session if the caller sent a valid token
#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<Session>);

/// Any signed in caller
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

/// Caller whose identity has admin capability
#[derive(Debug, Clone)]
pub struct AdminSession(pub Session);

#[axum::async_trait]
impl FromRequestParts<AppState> for MaybeSession {
    type Rejection = ClubPortalError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeSession(resolve(parts, state).await?))
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = ClubPortalError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        resolve(parts, state)
            .await?
            .map(CurrentSession)
            .ok_or_else(|| ClubPortalError::Authentication(AUTH_REQUIRED.to_string()))
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ClubPortalError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = resolve(parts, state)
            .await?
            .ok_or_else(|| ClubPortalError::Authentication(AUTH_REQUIRED.to_string()))?;

        if !session.identity.is_admin() {
            warn!(subject = %session.identity.subject(), "Non-admin session on admin route");
            return Err(ClubPortalError::AccessDenied(ADMIN_REQUIRED.to_string()));
        }
        Ok(AdminSession(session))
    }
}
