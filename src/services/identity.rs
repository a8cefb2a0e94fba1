//! Identity service client
//!
//! Password authentication is delegated to a GoTrue compatible REST API.
//! The [`IdentityProvider`] trait is the seam used by the auth services;
//! [`GoTrueClient`] is the HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::utils::errors::{ClubPortalError, IdentityError, IdentityResult, Result};
use crate::utils::logging::log_api_error;

/// User record returned by the identity service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// Authenticated remote session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub user: AuthUser,
}

/// Sign up outcome; `session` is absent when the account still needs
/// email confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpResult {
    pub user: AuthUser,
    pub session: Option<AuthSession>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SignUpBody {
    Session(AuthSession),
    User(AuthUser),
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> IdentityResult<AuthSession>;
    async fn sign_up(&self, email: &str, password: &str) -> IdentityResult<SignUpResult>;
    async fn sign_out(&self, access_token: &str) -> IdentityResult<()>;
}

/// HTTP client for the identity service
#[derive(Clone, Debug)]
pub struct GoTrueClient {
    client: Client,
    base_url: Url,
    anon_key: String,
}

impl GoTrueClient {
    pub fn new(config: &AuthConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("ClubPortal/1.0")
            .build()
            .map_err(ClubPortalError::Http)?;

        let mut base_url = Url::parse(&config.identity_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            anon_key: config.anon_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> IdentityResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| IdentityError::RequestFailed(e.to_string()))
    }

    fn with_key(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("apikey", &self.anon_key)
    }

    async fn send(&self, request: RequestBuilder) -> IdentityResult<Response> {
        request.send().await.map_err(|e| {
            if e.is_timeout() {
                IdentityError::Timeout
            } else if e.is_connect() {
                IdentityError::ServiceUnavailable
            } else {
                IdentityError::RequestFailed(e.to_string())
            }
        })
    }
}

async fn error_message(response: Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.error_description.or(body.msg).or(body.message))
        .unwrap_or_else(|| format!("HTTP {}: {}", status, text))
}

fn server_failure(status: StatusCode, message: String) -> IdentityError {
    if status.is_server_error() {
        log_api_error("identity", &message, Some(status.as_str()));
        IdentityError::ServiceUnavailable
    } else {
        IdentityError::RequestFailed(message)
    }
}

async fn parse_json<T>(response: Response) -> IdentityResult<T>
where
    T: for<'de> Deserialize<'de>,
{
    response
        .json::<T>()
        .await
        .map_err(|e| IdentityError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl IdentityProvider for GoTrueClient {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> IdentityResult<AuthSession> {
        debug!(email = %email, "Signing in against identity service");

        let request = self
            .client
            .post(self.endpoint("auth/v1/token")?)
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }));
        let response = self.send(self.with_key(request)).await?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            return Err(IdentityError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(server_failure(status, error_message(response).await));
        }

        parse_json(response).await
    }

    async fn sign_up(&self, email: &str, password: &str) -> IdentityResult<SignUpResult> {
        debug!(email = %email, "Signing up against identity service");

        let request = self
            .client
            .post(self.endpoint("auth/v1/signup")?)
            .json(&json!({ "email": email, "password": password }));
        let response = self.send(self.with_key(request)).await?;

        let status = response.status();
        if status.is_client_error() {
            return Err(IdentityError::Rejected(error_message(response).await));
        }
        if !status.is_success() {
            return Err(server_failure(status, error_message(response).await));
        }

        Ok(match parse_json::<SignUpBody>(response).await? {
            SignUpBody::Session(session) => SignUpResult {
                user: session.user.clone(),
                session: Some(session),
            },
            SignUpBody::User(user) => SignUpResult { user, session: None },
        })
    }

    async fn sign_out(&self, access_token: &str) -> IdentityResult<()> {
        let request = self
            .client
            .post(self.endpoint("auth/v1/logout")?)
            .bearer_auth(access_token);
        let response = self.send(self.with_key(request)).await?;

        let status = response.status();
        // an already expired token means the remote session is gone
        if status.is_success() || status == StatusCode::UNAUTHORIZED || status == StatusCode::NOT_FOUND {
            return Ok(());
        }
        Err(server_failure(status, error_message(response).await))
    }
}
