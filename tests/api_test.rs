//! HTTP API tests through the router

mod helpers;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use helpers::*;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;
use ClubPortal::models::EventStatus;
use ClubPortal::ClubStore;

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn post(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new().await;
    let (status, body) = send(ctx.app(), get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");

    ctx.store.set_unavailable(true);
    let (status, body) = send(ctx.app(), get("/health", None)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_registration_requires_valid_form_and_session() {
    let ctx = TestContext::new().await;
    let event = ctx.seed_event("Web Development Workshop", EventStatus::Active).await;

    let (status, body) = send(ctx.app(), post("/registrations", None, json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["details"]["eventId"], "Event selection is required");

    let form = json!({
        "name": "Jane Doe",
        "usn": STUDENT_USN,
        "email": STUDENT_EMAIL,
        "department": "Computer Science",
        "year": "3rd Year",
        "eventId": event.id,
    });
    let (status, _) = send(ctx.app(), post("/registrations", None, form.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let session = ctx.student_session().await;
    let (status, body) = send(ctx.app(), post("/registrations", Some(&session.token), form)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["registration"]["usn"], STUDENT_USN);
    assert_eq!(body["data"]["nextForm"]["email"], STUDENT_EMAIL);
    assert_eq!(body["data"]["nextForm"]["name"], "");
}

#[tokio::test]
async fn test_certificate_lookup_and_download() {
    let ctx = TestContext::new().await;
    let event = ctx.seed_event("Data Science Bootcamp", EventStatus::Completed).await;
    let session = ctx.student_session().await;
    ctx.services
        .registration_service
        .register(Some(&session), &registration_form(event.id, STUDENT_USN))
        .await
        .unwrap();

    let (status, body) = send(ctx.app(), get("/certificates?usn=1ab21cs045", None)).await;
    assert_eq!(status, StatusCode::OK);
    let certificates = body["data"].as_array().unwrap();
    assert_eq!(certificates.len(), 1);
    assert_eq!(certificates[0]["eventName"], "Data Science Bootcamp");
    let id = certificates[0]["id"].as_str().unwrap().to_string();

    let response = ctx
        .app()
        .oneshot(get(&format!("/certificates/{}/pdf", id), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        format!("attachment; filename=\"certificate-{}.pdf\"", id).as_str()
    );

    let (status, body) = send(ctx.app(), get(&format!("/certificates/{}/pdf", Uuid::new_v4()), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_admin_routes_require_admin() {
    let ctx = TestContext::new().await;

    let (status, _) = send(ctx.app(), get("/admin/registrations", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let student = ctx.student_session().await;
    let (status, body) = send(ctx.app(), get("/admin/stats", Some(&student.token))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "ACCESS_DENIED");

    let admin = ctx.remote_admin_session().await;
    let (status, body) = send(ctx.app(), get("/admin/stats", Some(&admin.token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["events"], 0);
}

#[tokio::test]
async fn test_admin_event_management_and_verification() {
    let ctx = TestContext::new().await;
    let admin = ctx.local_admin_session().await;

    let (status, body) = send(
        ctx.app(),
        post(
            "/admin/events",
            Some(&admin.token),
            json!({ "title": "Rust Workshop", "date": "2025-03-10T10:00:00Z", "location": "Lab 3" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "planning");
    let event_id = body["data"]["id"].as_str().unwrap().to_string();

    let update = Request::builder()
        .method("PUT")
        .uri(format!("/admin/events/{}", event_id))
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", admin.token))
        .body(Body::from(json!({ "status": "completed" }).to_string()))
        .unwrap();
    let (status, body) = send(ctx.app(), update).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "completed");
    assert_eq!(body["data"]["location"], "Lab 3");

    let student = ctx.student_session().await;
    let event_uuid = Uuid::parse_str(&event_id).unwrap();
    let receipt = ctx
        .services
        .registration_service
        .register(Some(&student), &registration_form(event_uuid, STUDENT_USN))
        .await
        .unwrap();

    let (status, body) = send(
        ctx.app(),
        post(
            &format!("/admin/registrations/{}/verify", receipt.registration.id),
            Some(&admin.token),
            json!({}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["verified"], true);
    assert_eq!(body["data"][0]["event_title"], "Rust Workshop");

    let (status, body) = send(ctx.app(), get("/admin/activity?limit=2", Some(&admin.token))).await;
    assert_eq!(status, StatusCode::OK);
    let activity = body["data"].as_array().unwrap();
    assert_eq!(activity.len(), 2);
    assert_eq!(activity[0]["activity_type"], "certificate_issued");
    assert_eq!(activity[1]["activity_type"], "event_registration");

    let (_, body) = send(ctx.app(), get("/admin/stats", Some(&admin.token))).await;
    assert_eq!(body["data"], json!({ "events": 1, "registrations": 1, "certificates": 1 }));
}

#[tokio::test]
async fn test_grant_role_then_admin_login() {
    let ctx = TestContext::new().await;
    let admin = ctx.local_admin_session().await;
    let user_id = Uuid::new_v4();

    let (status, _) = send(
        ctx.app(),
        post(&format!("/admin/users/{}/roles", user_id), Some(&admin.token), json!({ "role": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    ctx.identity.mock_sign_in("new.lead@club.example", user_id, "remote").await;
    let (status, body) = send(
        ctx.app(),
        post("/admin/login", None, json!({ "email": "new.lead@club.example", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_admin"], true);
    assert_eq!(body["data"]["identity"]["kind"], "remote_user");
    assert!(body["data"].get("access_token").is_none());

    let token = body["data"]["token"].as_str().unwrap().to_string();
    let (status, body) = send(ctx.app(), get("/auth/session", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["identity"]["id"], user_id.to_string());
}

#[tokio::test]
async fn test_sign_out_invalidates_token() {
    let ctx = TestContext::new().await;
    let session = ctx.local_admin_session().await;

    let (status, _) = send(ctx.app(), post("/auth/sign-out", Some(&session.token), json!({}))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(ctx.app(), get("/auth/session", Some(&session.token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(ctx.store.recent_activity(10).await.unwrap().is_empty());
}
