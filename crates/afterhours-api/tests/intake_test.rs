//! Integration tests for the emergency intake endpoint.
//!
//! Drives the real router in-process with a mock record store, asserting
//! the full request/response contract: tool discrimination, validation,
//! field normalization, and upstream failure mapping.

use std::sync::Arc;

use afterhours_airtable::{error::AirtableError, store::mock::MockRecordStore};
use afterhours_api::{create_router, AppState, Config};
use afterhours_core::TestClock;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Builds an app backed by a mock store and a clock pinned to a known time.
fn test_app() -> (axum::Router, Arc<MockRecordStore>) {
    let mut config = Config::default();
    config.airtable_token = "pat-test".to_string();
    config.base_id = "appTEST".to_string();

    let store = Arc::new(MockRecordStore::new());
    let clock = TestClock::at(Utc.with_ymd_and_hms(2026, 1, 5, 3, 24, 0).unwrap());

    let state = AppState::new(Arc::new(config), store.clone(), Arc::new(clock));
    (create_router(state), store)
}

fn webhook_request(payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/emergency-webhook")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&body_bytes).expect("response body should be valid JSON")
}

fn full_emergency_payload() -> Value {
    json!({
        "name": "log-the-emergency",
        "args": {
            "caller": "  Jane Doe  ",
            "address_of_emergency": "42 Elm St",
            "property_manager": "Pat Lee",
            "company_name": "Acme Property Co",
            "emergency_type": "Flooding",
            "call_transcription": "Water is coming through the ceiling.",
            "callback_number": "555-123-4567"
        },
        "call": { "call_id": "call_abc123" }
    })
}

#[tokio::test]
async fn irrelevant_tool_is_acknowledged_without_external_call() {
    let (app, store) = test_app();

    let payload = json!({ "name": "check-availability", "args": {} });
    let response = app.oneshot(webhook_request(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(
        body["message"],
        json!("Tool check-availability received but not processed by emergency handler")
    );
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn missing_caller_rejected_without_external_call() {
    let (app, store) = test_app();

    let payload = json!({
        "name": "log-the-emergency",
        "args": { "emergency_type": "Flooding" }
    });
    let response = app.oneshot(webhook_request(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["error"], json!("Missing required emergency data"));
    assert_eq!(body["required"], json!(["caller", "emergency_type"]));
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn whitespace_emergency_type_rejected_without_external_call() {
    let (app, store) = test_app();

    let payload = json!({
        "name": "log-the-emergency",
        "args": { "caller": "Jane Doe", "emergency_type": "   " }
    });
    let response = app.oneshot(webhook_request(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["required"], json!(["caller", "emergency_type"]));
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn well_formed_emergency_is_logged_with_exact_field_map() {
    let (app, store) = test_app();
    store.respond_with_record_id("rec123");

    let response = app.oneshot(webhook_request(&full_emergency_payload())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["record_id"], json!("rec123"));
    assert_eq!(body["logged"], json!(true));
    assert_eq!(body["message"], json!("Emergency logged successfully"));
    assert_eq!(
        body["processed_data"],
        json!({
            "caller": "Jane Doe",
            "emergency_type": "Flooding",
            "property": "42 Elm St",
            "manager": "Pat Lee",
            "callback_number": "(555) 123-4567",
            "logged_at": "2026-01-05T03:24:00.000Z"
        })
    );

    let calls = store.recorded_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].table, "AfterHoursCallLog");
    assert_eq!(
        calls[0].fields,
        json!({
            "Timestamp": "2026-01-05T03:24:00.000Z",
            "Caller Name": "Jane Doe",
            "Property Name": "42 Elm St",
            "Manager Name": "Pat Lee",
            "Company Name": "Acme Property Co",
            "Emergency Type": "Flooding",
            "Transcript": "Water is coming through the ceiling.",
            "Callback Number": "(555) 123-4567"
        })
    );
}

#[tokio::test]
async fn optional_fields_default_in_outbound_record() {
    let (app, store) = test_app();
    store.respond_with_record_id("rec456");

    let payload = json!({
        "name": "log-the-emergency",
        "args": { "caller": "Jane Doe", "emergency_type": "Gas leak" }
    });
    let response = app.oneshot(webhook_request(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let calls = store.recorded_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].fields["Property Name"], json!("Unknown Property"));
    assert_eq!(calls[0].fields["Manager Name"], json!("Unknown Manager"));
    assert_eq!(calls[0].fields["Company Name"], json!("Unknown Company"));
    assert_eq!(calls[0].fields["Transcript"], json!("No transcript available"));
    assert_eq!(calls[0].fields["Callback Number"], json!("No callback number"));
}

#[tokio::test]
async fn upstream_failure_maps_to_500_with_details() {
    let (app, store) = test_app();

    let upstream_body = json!({
        "error": {
            "type": "INVALID_VALUE_FOR_COLUMN",
            "message": "Field \"Timestamp\" cannot accept the provided value"
        }
    });
    store.respond_with_error(AirtableError::api(422, upstream_body.clone()));

    let response = app.oneshot(webhook_request(&full_emergency_payload())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["logged"], json!(false));
    assert_eq!(body["error"], json!("Failed to log emergency"));
    assert_eq!(body["message"], json!("Emergency logging failed"));
    assert_eq!(body["details"], upstream_body);
}

#[tokio::test]
async fn network_failure_maps_to_500_with_message_details() {
    let (app, store) = test_app();
    store.respond_with_error(AirtableError::network("connection refused"));

    let response = app.oneshot(webhook_request(&full_emergency_payload())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response_json(response).await;
    assert_eq!(body["logged"], json!(false));
    assert_eq!(body["details"], json!("network connection failed: connection refused"));
}

#[tokio::test]
async fn structurally_light_payload_is_still_routed() {
    let (app, store) = test_app();

    // No name, no args, no call: routed through tool discrimination rather
    // than rejected by deserialization.
    let response = app.oneshot(webhook_request(&json!({}))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn responses_carry_request_id_header() {
    let (app, _store) = test_app();

    let payload = json!({ "name": "some-other-tool", "args": {} });
    let response = app.oneshot(webhook_request(&payload)).await.unwrap();

    assert!(response.headers().contains_key("X-Request-Id"));
}
