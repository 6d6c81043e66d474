//! Health check handler for service monitoring.
//!
//! Reports process liveness and which configuration values are present.
//! Never performs an external call and never exposes the credential value,
//! only its presence.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::AppState;

/// Endpoint paths served by this process, reported for operator visibility.
pub const ENDPOINTS: [&str; 2] = ["/emergency-webhook", "/health"];

/// Health check response structure.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status; always "ok" when the process responds.
    pub status: &'static str,
    /// Timestamp when the health check was performed.
    pub timestamp: DateTime<Utc>,
    /// Available endpoint paths.
    pub endpoints: [&'static str; 2],
    /// Configuration presence indicators.
    pub environment: EnvironmentPresence,
}

/// Which configuration values are in effect. Values themselves are never
/// reported.
#[derive(Debug, Serialize)]
pub struct EnvironmentPresence {
    /// Whether the Airtable credential is configured.
    pub has_airtable_token: bool,
    /// Whether the Airtable base identifier is configured.
    pub has_base_id: bool,
    /// Name of the table records are written to.
    pub afterhours_table: String,
}

/// Health check endpoint handler.
///
/// Designed to be called frequently by monitors and load balancers: no
/// side effects, no external calls, always 200.
#[instrument(name = "health_check", skip(state))]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    debug!("Performing health check");

    let response = HealthResponse {
        status: "ok",
        timestamp: state.clock.now_utc(),
        endpoints: ENDPOINTS,
        environment: EnvironmentPresence {
            has_airtable_token: state.config.has_airtable_token(),
            has_base_id: state.config.has_base_id(),
            afterhours_table: state.config.afterhours_table_name.clone(),
        },
    };

    (StatusCode::OK, Json(response))
}
