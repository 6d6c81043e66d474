//! End-to-end tests for the complete intake path.
//!
//! Serves the real router with a real Airtable client pointed at a
//! wiremock stand-in, and drives it over the network with reqwest:
//! HTTP ingestion through field normalization to the outbound
//! record-create call and back.

use std::sync::Arc;

use afterhours_airtable::AirtableClient;
use afterhours_api::{create_router, AppState, Config};
use afterhours_core::RealClock;
use anyhow::Result;
use serde_json::{json, Value};
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Binds the service on an ephemeral port, wired to the given Airtable
/// stand-in, and returns its base URL.
async fn serve_app(airtable_url: String) -> Result<String> {
    let mut config = Config::default();
    config.airtable_token = "pat-e2e-token".to_string();
    config.base_id = "appE2EBASE".to_string();
    config.airtable_api_base_url = airtable_url;

    let client = AirtableClient::new(config.to_client_config())?;
    let state = AppState::new(Arc::new(config), Arc::new(client), Arc::new(RealClock::new()));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server failed");
    });

    Ok(format!("http://{addr}"))
}

fn emergency_payload() -> Value {
    json!({
        "name": "log-the-emergency",
        "args": {
            "caller": "Jane Doe",
            "address_of_emergency": "42 Elm St",
            "property_manager": "Pat Lee",
            "company_name": "Acme Property Co",
            "emergency_type": "Flooding",
            "call_transcription": "Water is coming through the ceiling.",
            "callback_number": "15551234567"
        },
        "call": { "call_id": "call_abc123" }
    })
}

#[tokio::test]
async fn emergency_flows_from_webhook_to_airtable() -> Result<()> {
    let airtable = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/appE2EBASE/AfterHoursCallLog"))
        .and(header("authorization", "Bearer pat-e2e-token"))
        .and(body_partial_json(json!({
            "records": [{
                "fields": {
                    "Caller Name": "Jane Doe",
                    "Property Name": "42 Elm St",
                    "Manager Name": "Pat Lee",
                    "Company Name": "Acme Property Co",
                    "Emergency Type": "Flooding",
                    "Transcript": "Water is coming through the ceiling.",
                    "Callback Number": "+1 (555) 123-4567"
                }
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [{ "id": "recE2E001", "createdTime": "2026-01-05T03:24:00.000Z" }]
        })))
        .expect(1)
        .mount(&airtable)
        .await;

    let base_url = serve_app(airtable.uri()).await?;
    let http = reqwest::Client::new();

    let response =
        http.post(format!("{base_url}/emergency-webhook")).json(&emergency_payload()).send().await?;

    assert_eq!(response.status(), 200);

    let body: Value = response.json().await?;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["record_id"], json!("recE2E001"));
    assert_eq!(body["logged"], json!(true));
    assert_eq!(body["processed_data"]["callback_number"], json!("+1 (555) 123-4567"));

    Ok(())
}

#[tokio::test]
async fn upstream_rejection_surfaces_as_terminal_failure() -> Result<()> {
    let airtable = MockServer::start().await;

    let upstream_error = json!({
        "error": { "type": "AUTHENTICATION_REQUIRED", "message": "Invalid authentication token" }
    });

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(upstream_error.clone()))
        // Exactly one call: failures are terminal, never retried.
        .expect(1)
        .mount(&airtable)
        .await;

    let base_url = serve_app(airtable.uri()).await?;
    let http = reqwest::Client::new();

    let response =
        http.post(format!("{base_url}/emergency-webhook")).json(&emergency_payload()).send().await?;

    assert_eq!(response.status(), 500);

    let body: Value = response.json().await?;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["logged"], json!(false));
    assert_eq!(body["details"], upstream_error);

    Ok(())
}

#[tokio::test]
async fn irrelevant_tool_and_health_never_reach_airtable() -> Result<()> {
    let airtable = MockServer::start().await;

    Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&airtable).await;

    let base_url = serve_app(airtable.uri()).await?;
    let http = reqwest::Client::new();

    let response = http
        .post(format!("{base_url}/emergency-webhook"))
        .json(&json!({ "name": "transfer-call", "args": {} }))
        .send()
        .await?;
    assert_eq!(response.status(), 200);

    let health = http.get(format!("{base_url}/health")).send().await?;
    assert_eq!(health.status(), 200);

    let body: Value = health.json().await?;
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["environment"]["has_airtable_token"], json!(true));
    assert_eq!(body["environment"]["afterhours_table"], json!("AfterHoursCallLog"));

    Ok(())
}
