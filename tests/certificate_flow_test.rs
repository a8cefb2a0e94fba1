//! Certificate lookup-or-generate and admin verification flows

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use ClubPortal::models::{EventStatus, RegistrationForm};
use ClubPortal::{ClubPortalError, ClubStore};

async fn register(ctx: &TestContext, form: &RegistrationForm) {
    let session = ctx.student_session().await;
    ctx.services
        .registration_service
        .register(Some(&session), form)
        .await
        .expect("registration accepted");
}

#[tokio::test]
async fn test_unknown_usn_returns_empty() {
    let ctx = TestContext::new().await;
    let found = ctx.services.certificate_service.lookup("1XY99ZZ999").await.unwrap();
    assert!(found.is_empty());
    assert_eq!(ctx.store.certificate_count().await, 0);
}

#[tokio::test]
async fn test_empty_usn_is_rejected() {
    let ctx = TestContext::new().await;
    let err = ctx.services.certificate_service.lookup("   ").await.unwrap_err();
    assert_matches!(err, ClubPortalError::Validation(errors) => {
        assert_eq!(errors["usn"], "USN is required");
    });
}

#[tokio::test]
async fn test_completed_event_issues_exactly_once() {
    let ctx = TestContext::new().await;
    let event = ctx.seed_event("Introduction to Cloud Computing", EventStatus::Completed).await;
    register(&ctx, &registration_form(event.id, STUDENT_USN)).await;

    let first = ctx.services.certificate_service.lookup(STUDENT_USN).await.unwrap();
    assert_eq!(first.len(), 1);
    let certificate = &first[0];
    assert_eq!(certificate.event_name, "Introduction to Cloud Computing");
    assert_eq!(certificate.student_name, "Jane Doe");
    assert_eq!(certificate.usn, STUDENT_USN);
    assert_eq!(certificate.certificate_url, format!("certificate-{}.pdf", certificate.id));
    assert_eq!(
        certificate.date,
        event.date.format(&ctx.settings.certificates.date_format).to_string()
    );

    // lowercase and padded input finds the same certificate
    let second = ctx.services.certificate_service.lookup(" 1ab21cs045 ").await.unwrap();
    assert_eq!(second, first);
    assert_eq!(ctx.store.certificate_count().await, 1);
}

#[tokio::test]
async fn test_non_completed_events_never_issue() {
    let ctx = TestContext::new().await;
    for status in [EventStatus::Planning, EventStatus::Active] {
        let event = ctx.seed_event("Upcoming Workshop", status).await;
        register(&ctx, &registration_form(event.id, STUDENT_USN)).await;
    }

    let found = ctx.services.certificate_service.lookup(STUDENT_USN).await.unwrap();
    assert!(found.is_empty());
    assert_eq!(ctx.store.certificate_count().await, 0);
}

#[tokio::test]
async fn test_duplicate_registrations_yield_one_certificate() {
    let ctx = TestContext::new().await;
    let event = ctx.seed_event("Data Science Bootcamp", EventStatus::Completed).await;
    let form = registration_form(event.id, STUDENT_USN);
    register(&ctx, &form).await;
    register(&ctx, &form).await;

    let found = ctx.services.certificate_service.lookup(STUDENT_USN).await.unwrap();
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn test_existing_certificates_block_generation() {
    let ctx = TestContext::new().await;
    let done = ctx.seed_event("Blockchain Technology Workshop", EventStatus::Completed).await;
    register(&ctx, &registration_form(done.id, STUDENT_USN)).await;
    assert_eq!(ctx.services.certificate_service.lookup(STUDENT_USN).await.unwrap().len(), 1);

    // a later completed event is not picked up once certificates exist
    let later = ctx.seed_event("Cybersecurity Workshop", EventStatus::Completed).await;
    register(&ctx, &registration_form(later.id, STUDENT_USN)).await;

    let found = ctx.services.certificate_service.lookup(STUDENT_USN).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].event_name, "Blockchain Technology Workshop");
}

#[tokio::test]
async fn test_store_failure_surfaces_generic_error() {
    let ctx = TestContext::new().await;
    ctx.store.set_unavailable(true);
    let err = ctx.services.certificate_service.lookup(STUDENT_USN).await.unwrap_err();
    assert_matches!(err, ClubPortalError::ServiceUnavailable(_));
}

#[tokio::test]
async fn test_admin_verify_issues_and_refreshes_list() {
    let ctx = TestContext::new().await;
    let event = ctx.seed_event("Web Development Workshop", EventStatus::Active).await;
    register(&ctx, &registration_form(event.id, STUDENT_USN)).await;
    register(&ctx, &registration_form(event.id, "1AB21CS046")).await;

    let before = ctx.services.certificate_service.admin_registrations().await.unwrap();
    assert_eq!(before.len(), 2);
    assert!(before.iter().all(|r| !r.verified));
    // newest first
    assert_eq!(before[0].registration.usn, "1AB21CS046");

    let admin = ctx.local_admin_session().await;
    let target = before[1].registration.id;
    let after = ctx
        .services
        .certificate_service
        .verify(target, &admin.identity)
        .await
        .unwrap();

    let verified: Vec<_> = after.iter().filter(|r| r.verified).collect();
    assert_eq!(verified.len(), 1);
    assert_eq!(verified[0].registration.id, target);

    // verification ignores event status, and lookup now returns it
    let found = ctx.services.certificate_service.lookup(STUDENT_USN).await.unwrap();
    assert_eq!(found.len(), 1);

    let activity = ctx.store.recent_activity(1).await.unwrap();
    assert_eq!(activity[0].activity_type, "certificate_issued");
    assert_eq!(activity[0].user_id, admin.identity.subject());
}

#[tokio::test]
async fn test_verify_unknown_registration() {
    let ctx = TestContext::new().await;
    let admin = ctx.local_admin_session().await;
    let missing = uuid::Uuid::new_v4();
    let err = ctx
        .services
        .certificate_service
        .verify(missing, &admin.identity)
        .await
        .unwrap_err();
    assert_matches!(err, ClubPortalError::RegistrationNotFound { registration_id } if registration_id == missing);
    assert_eq!(ctx.store.certificate_count().await, 0);
}

#[tokio::test]
async fn test_downloads_render_pdf() {
    let ctx = TestContext::new().await;
    let event = ctx.seed_event("Mobile App Development Series", EventStatus::Completed).await;
    register(&ctx, &registration_form(event.id, STUDENT_USN)).await;

    let certificate = ctx.services.certificate_service.lookup(STUDENT_USN).await.unwrap().remove(0);
    let download = ctx.services.certificate_service.download(certificate.id).await.unwrap();
    assert_eq!(download.file_name, certificate.certificate_url);
    assert!(download.bytes.starts_with(b"%PDF"));

    let registration = ctx.services.certificate_service.admin_registrations().await.unwrap().remove(0);
    let download = ctx
        .services
        .certificate_service
        .download_for_registration(registration.registration.id)
        .await
        .unwrap();
    assert_eq!(download.file_name, "Jane_Doe-Mobile_App_Development_Series-certificate.pdf");
    assert!(download.bytes.starts_with(b"%PDF"));
}
