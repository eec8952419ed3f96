mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{dead_base_url, StubResponse, StubServer};
use portfolio_core::models::{ContactMessage, Rating, SubmittableRecord, Testimonial};
use portfolio_core::screen::{Feedback, FormController};
use portfolio_core::{
    FormSubmissionGateway, RecordStore, StoreConfig, SubmissionError, SupabaseStore,
    TestimonialFeed,
};
use serde_json::json;

fn store(base_url: &str) -> Arc<SupabaseStore> {
    Arc::new(
        SupabaseStore::new(&StoreConfig {
            url: base_url.to_string(),
            anon_key: "anon-key".to_string(),
        })
        .unwrap(),
    )
}

fn filled_contact_form() -> FormController<ContactMessage> {
    let mut form = FormController::<ContactMessage>::new();
    *form.draft_mut() = ContactMessage {
        email: "visitor@example.com".to_string(),
        subject: "Collaboration".to_string(),
        message: "  Would love to work together.  ".to_string(),
    };
    form
}

#[tokio::test]
async fn test_contact_submission_inserts_once_and_clears_form() {
    let server = StubServer::start(|_| StubResponse::text(201, "")).await;
    let gateway = FormSubmissionGateway::new(store(&server.base_url)).with_analytics(false);
    let mut form = filled_contact_form();

    assert!(form.submit(&gateway).await);
    assert_eq!(form.draft(), &ContactMessage::default());
    assert!(matches!(form.feedback(), Some(Feedback::Success(_))));

    let inserts = server.requests_to("/rest/v1/contacts");
    assert_eq!(inserts.len(), 1);
    assert_eq!(server.requests().len(), 1);

    let request = &inserts[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.header("apikey"), Some("anon-key"));
    assert_eq!(request.header("authorization"), Some("Bearer anon-key"));
    assert_eq!(request.header("prefer"), Some("return=minimal"));
    assert_eq!(
        request.json(),
        json!([{
            "email": "visitor@example.com",
            "subject": "Collaboration",
            "message": "Would love to work together."
        }])
    );
}

#[tokio::test]
async fn test_network_error_keeps_form_populated() {
    let gateway = FormSubmissionGateway::new(store(&dead_base_url()));
    let mut form = filled_contact_form();

    assert!(!form.submit(&gateway).await);
    assert_eq!(form.draft().email, "visitor@example.com");
    assert!(!form.is_submitting());
    match form.feedback() {
        Some(Feedback::Error(message)) => assert!(message.contains("Could not reach")),
        other => panic!("unexpected feedback: {:?}", other),
    }
}

#[tokio::test]
async fn test_store_rejection_carries_reason() {
    let server = StubServer::start(|_| {
        StubResponse::json(401, json!({"message": "Invalid API key", "hint": null}))
    })
    .await;
    let gateway = FormSubmissionGateway::new(store(&server.base_url));

    let record = SubmittableRecord::from(Testimonial {
        name: "Ada".to_string(),
        message: "Great work".to_string(),
        ..Default::default()
    });
    let err = gateway.submit(&record).await.unwrap_err();

    assert_eq!(
        err,
        SubmissionError::Rejected {
            status: 401,
            reason: "Invalid API key".to_string()
        }
    );
    assert!(server.requests_to("/rest/v1/analytics").is_empty());
}

#[tokio::test]
async fn test_invalid_testimonial_makes_no_request() {
    let server = StubServer::start(|_| StubResponse::text(201, "")).await;
    let gateway = FormSubmissionGateway::new(store(&server.base_url));

    let record = SubmittableRecord::from(Testimonial {
        name: String::new(),
        message: "Great work".to_string(),
        ..Default::default()
    });

    let validation = gateway.validate(&record);
    assert!(!validation.is_valid());
    assert_eq!(validation.error_for("name"), Some("required"));

    assert!(matches!(
        gateway.submit(&record).await,
        Err(SubmissionError::Invalid(_))
    ));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_testimonial_row_and_analytics_event() {
    let server = StubServer::start(|req| match req.path() {
        "/rest/v1/analytics" => StubResponse::text(500, "analytics down"),
        _ => StubResponse::text(201, ""),
    })
    .await;
    let gateway = FormSubmissionGateway::new(store(&server.base_url));

    let record = SubmittableRecord::from(Testimonial {
        name: "Ada".to_string(),
        role: "CTO".to_string(),
        company: "Engines Ltd".to_string(),
        message: "Great work".to_string(),
        rating: Rating::new(4),
    });
    gateway.submit(&record).await.unwrap();

    let inserts = server.requests_to("/rest/v1/testimonials");
    assert_eq!(inserts.len(), 1);
    assert_eq!(inserts[0].json()[0]["rating"], 4);
    assert_eq!(inserts[0].json()[0]["company"], "Engines Ltd");

    gateway.track_event("page_view", "testimonials");
    assert!(gateway.flush_analytics(Duration::from_secs(5)).await);
    let events: Vec<_> = server
        .requests_to("/rest/v1/analytics")
        .iter()
        .map(|r| r.json()[0].clone())
        .collect();
    assert!(events
        .iter()
        .any(|e| e["event_type"] == "page_view" && e["page"] == "testimonials"));
    assert!(events
        .iter()
        .any(|e| e["event_type"] == "testimonial_submitted" && e["page"] == "testimonials"));
    assert!(events.iter().all(|e| e["user_agent"].is_string()));
}

#[tokio::test]
async fn test_feed_reads_newest_first() {
    let server = StubServer::start(|_| {
        StubResponse::json(
            200,
            json!([
                {"id": "b", "name": "Grace", "role": "Engineer", "company": "Navy",
                 "message": "Sharp", "rating": 5, "created_at": "2024-06-02T12:00:00+00:00"},
                {"id": "a", "name": "Ada", "role": null, "company": null,
                 "message": "Great", "rating": 4, "created_at": "2024-06-01T12:00:00+00:00"}
            ]),
        )
    })
    .await;
    let store = store(&server.base_url);

    let wall = TestimonialFeed::new(store.clone()).with_limit(5).load().await;
    let names: Vec<_> = wall.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Grace", "Ada"]);

    let requests = server.requests();
    assert_eq!(requests[0].method, "GET");
    assert_eq!(
        requests[0].target,
        "/rest/v1/testimonials?select=*&order=created_at.desc&limit=5"
    );
    assert_eq!(store.name(), "Supabase");
}

#[tokio::test]
async fn test_feed_failure_is_empty() {
    let server = StubServer::start(|_| StubResponse::text(500, "")).await;
    assert!(TestimonialFeed::new(store(&server.base_url))
        .load()
        .await
        .is_empty());
    assert!(TestimonialFeed::new(store(&dead_base_url()))
        .load()
        .await
        .is_empty());
}
