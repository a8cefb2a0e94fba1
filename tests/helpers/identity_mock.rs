//! Mock identity service for testing
//!
//! Simulates the GoTrue REST endpoints with wiremock.

use serde_json::json;
use uuid::Uuid;
use wiremock::{
    matchers::{body_partial_json, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

pub const TEST_ANON_KEY: &str = "test-anon-key";

/// Mock identity service
pub struct IdentityMockServer {
    pub server: MockServer,
}

impl IdentityMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Password sign in for `email` succeeds as `user_id`, returning
    /// `access_token`
    pub async fn mock_sign_in(&self, email: &str, user_id: Uuid, access_token: &str) {
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .and(query_param("grant_type", "password"))
            .and(header("apikey", TEST_ANON_KEY))
            .and(body_partial_json(json!({ "email": email })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": access_token,
                "token_type": "bearer",
                "expires_in": 3600,
                "refresh_token": "refresh-token",
                "user": { "id": user_id, "email": email, "aud": "authenticated" }
            })))
            .mount(&self.server)
            .await;
    }

    /// Every password sign in fails with invalid credentials
    pub async fn mock_sign_in_rejected(&self) {
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid login credentials"
            })))
            .mount(&self.server)
            .await;
    }

    /// Sign up returns a session (auto-confirmed accounts)
    pub async fn mock_sign_up_with_session(&self, email: &str, user_id: Uuid, access_token: &str) {
        Mock::given(method("POST"))
            .and(path("/auth/v1/signup"))
            .and(header("apikey", TEST_ANON_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": access_token,
                "token_type": "bearer",
                "expires_in": 3600,
                "user": { "id": user_id, "email": email }
            })))
            .mount(&self.server)
            .await;
    }

    /// Sign up returns only the user (email confirmation pending)
    pub async fn mock_sign_up_pending(&self, email: &str, user_id: Uuid) {
        Mock::given(method("POST"))
            .and(path("/auth/v1/signup"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": user_id,
                "email": email,
                "confirmation_sent_at": "2025-03-10T10:00:00Z"
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_sign_up_taken(&self) {
        Mock::given(method("POST"))
            .and(path("/auth/v1/signup"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "code": 422,
                "msg": "User already registered"
            })))
            .mount(&self.server)
            .await;
    }

    /// Sign out for `access_token`, expected exactly `times` times
    pub async fn expect_sign_out(&self, access_token: &str, times: u64) {
        Mock::given(method("POST"))
            .and(path("/auth/v1/logout"))
            .and(header("authorization", format!("Bearer {}", access_token).as_str()))
            .respond_with(ResponseTemplate::new(204))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Every request fails with a server error
    pub async fn mock_outage(&self) {
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
            .mount(&self.server)
            .await;
    }
}
