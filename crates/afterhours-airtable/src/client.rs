//! HTTP client for Airtable record creation.
//!
//! Handles request construction, response decoding, and error
//! categorization for the single create-record call the intake path
//! performs. The client is built once at startup and shares a pooled
//! connection across requests.

use std::{future::Future, pin::Pin, time::Duration};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info_span, Instrument};

use crate::{
    error::{AirtableError, Result},
    store::RecordStore,
};

/// Public Airtable REST API base.
pub const DEFAULT_API_BASE_URL: &str = "https://api.airtable.com/v0";

/// Configuration for the Airtable client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base URL; overridden in tests to point at a local stand-in.
    pub api_base_url: String,
    /// Airtable base the target table lives in.
    pub base_id: String,
    /// Bearer credential. Never logged.
    pub token: String,
    /// Deadline for the outbound call.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            base_id: String::new(),
            token: String::new(),
            timeout: Duration::from_secs(10),
            user_agent: "Afterhours-Intake/1.0".to_string(),
        }
    }
}

/// Airtable record-creation client.
///
/// Wraps a pooled `reqwest::Client` with a bounded timeout so a stalled
/// upstream cannot hold an intake request indefinitely. An absent token or
/// base id is not a construction error; it surfaces as an upstream API
/// rejection on the first create call, matching the service's
/// fail-at-runtime configuration contract.
#[derive(Debug, Clone)]
pub struct AirtableClient {
    client: reqwest::Client,
    config: ClientConfig,
}

/// Response body of a successful record-create call.
#[derive(Debug, Deserialize)]
struct CreateRecordsResponse {
    records: Vec<CreatedRecord>,
}

/// One created record as reported by Airtable.
#[derive(Debug, Deserialize)]
struct CreatedRecord {
    id: String,
    #[serde(rename = "createdTime", default)]
    created_time: Option<String>,
}

impl AirtableClient {
    /// Creates a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `AirtableError::Configuration` if the underlying HTTP
    /// client cannot be built with the provided settings.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                AirtableError::configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// Creates one record in `table` from the given field map.
    ///
    /// Issues `POST {api_base_url}/{base_id}/{table}` with bearer
    /// authentication and body `{"records": [{"fields": ...}]}`, and
    /// returns the created record's identifier.
    ///
    /// # Errors
    ///
    /// - `Timeout` when the request deadline is exceeded
    /// - `Network` for connection and transport failures
    /// - `Api` for non-2xx responses, carrying the upstream error body
    /// - `MalformedResponse` when a 2xx body lacks a created record
    pub async fn create_record(&self, table: &str, fields: Value) -> Result<String> {
        let start_time = std::time::Instant::now();
        let url = format!("{}/{}/{}", self.config.api_base_url, self.config.base_id, table);

        let span = info_span!(
            "airtable_create_record",
            table = %table,
            base_id = %self.config.base_id,
        );

        async move {
            tracing::debug!("Creating Airtable record");

            let response = match self
                .client
                .post(&url)
                .bearer_auth(&self.config.token)
                .json(&json!({ "records": [{ "fields": fields }] }))
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    let duration = start_time.elapsed();
                    tracing::warn!(duration_ms = duration.as_millis(), "Request failed: {}", e);

                    if e.is_timeout() {
                        return Err(AirtableError::timeout(self.config.timeout.as_secs()));
                    }
                    if e.is_connect() {
                        return Err(AirtableError::network(format!("connection failed: {e}")));
                    }
                    return Err(AirtableError::network(e.to_string()));
                },
            };

            let duration = start_time.elapsed();
            let status = response.status();

            tracing::debug!(
                status = status.as_u16(),
                duration_ms = duration.as_millis(),
                "Received response"
            );

            if !status.is_success() {
                let body = read_error_body(response).await;
                tracing::warn!(status = status.as_u16(), body = %body, "Airtable rejected record");
                return Err(AirtableError::api(status.as_u16(), body));
            }

            let created: CreateRecordsResponse = response
                .json()
                .await
                .map_err(|e| AirtableError::malformed(format!("failed to decode body: {e}")))?;

            let record = created
                .records
                .into_iter()
                .next()
                .ok_or_else(|| AirtableError::malformed("response contained no records"))?;

            tracing::info!(
                record_id = %record.id,
                created_time = ?record.created_time,
                duration_ms = duration.as_millis(),
                "Airtable record created"
            );

            Ok(record.id)
        }
        .instrument(span)
        .await
    }
}

impl RecordStore for AirtableClient {
    fn create_record<'a>(
        &'a self,
        table: &'a str,
        fields: Value,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(AirtableClient::create_record(self, table, fields))
    }
}

/// Reads a non-2xx response body as JSON, falling back to raw text.
async fn read_error_body(response: reqwest::Response) -> Value {
    match response.text().await {
        Ok(text) if text.is_empty() => Value::String(String::new()),
        Ok(text) => serde_json::from_str(&text).unwrap_or(Value::String(text)),
        Err(e) => Value::String(format!("[failed to read response body: {e}]")),
    }
}
