//! Emergency tool-call webhook handler.
//!
//! Discriminates emergency-logging calls from other tool calls, normalizes
//! the arguments into an [`EmergencyReport`], and writes one record to the
//! configured Airtable table. The write is the only network side effect in
//! the service; failure is terminal for the request and retry belongs to
//! the telephony platform.

use afterhours_core::{EmergencyFields, EmergencyReport, ToolCallRequest, EMERGENCY_TOOL_NAME};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::AppState;

/// Response for tool calls the emergency handler does not process.
#[derive(Debug, Serialize)]
pub struct ToolIgnoredResponse {
    /// Always true; an irrelevant tool call is not an error.
    pub success: bool,
    /// Explanation naming the ignored tool.
    pub message: String,
}

/// Response for a 400 validation failure.
#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    /// Fixed error description.
    pub error: String,
    /// Argument names the caller must supply.
    pub required: [&'static str; 2],
}

/// Response for a successfully logged emergency.
#[derive(Debug, Serialize)]
pub struct EmergencyLoggedResponse {
    /// Always true on this path.
    pub success: bool,
    /// Identifier of the created Airtable record.
    pub record_id: String,
    /// Fixed confirmation message.
    pub message: String,
    /// Always true on this path.
    pub logged: bool,
    /// Echo of the normalized fields for the caller's records.
    pub processed_data: ProcessedData,
}

/// Normalized fields echoed back to the telephony platform.
#[derive(Debug, Serialize)]
pub struct ProcessedData {
    /// Normalized caller name.
    pub caller: String,
    /// Normalized emergency type.
    pub emergency_type: String,
    /// Normalized property name.
    pub property: String,
    /// Normalized manager name.
    pub manager: String,
    /// Formatted callback number.
    pub callback_number: String,
    /// Report timestamp, ISO-8601.
    pub logged_at: String,
}

/// Response for an upstream logging failure.
#[derive(Debug, Serialize)]
pub struct LoggingFailedResponse {
    /// Always false on this path.
    pub success: bool,
    /// Always false on this path.
    pub logged: bool,
    /// Fixed error description.
    pub error: String,
    /// Fixed failure message.
    pub message: String,
    /// Upstream error payload or message, best effort.
    pub details: serde_json::Value,
}

/// Processes an inbound tool-call webhook.
///
/// Tool calls not named `log-the-emergency` are acknowledged with 200 and
/// ignored. Emergency calls are normalized, validated, and written to
/// Airtable; the response reports the created record id or the upstream
/// failure detail.
#[instrument(
    name = "emergency_webhook",
    skip(state, request),
    fields(tool_name = %request.name)
)]
pub async fn emergency_webhook(
    State(state): State<AppState>,
    Json(request): Json<ToolCallRequest>,
) -> Response {
    debug!(payload = ?request, "Emergency webhook received");

    if request.name != EMERGENCY_TOOL_NAME {
        info!(tool = %request.name, "Ignoring non-emergency tool call");
        return (
            StatusCode::OK,
            Json(ToolIgnoredResponse {
                success: true,
                message: format!(
                    "Tool {} received but not processed by emergency handler",
                    request.name
                ),
            }),
        )
            .into_response();
    }

    let report = match EmergencyReport::from_args(&request.args, state.clock.now_utc()) {
        Ok(report) => report,
        Err(e) => {
            warn!("Missing required emergency data");
            return (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorResponse {
                    error: e.to_string(),
                    required: afterhours_core::ReportError::required_fields(),
                }),
            )
                .into_response();
        },
    };

    info!(
        caller = %report.caller_name,
        emergency = %report.emergency_type,
        property = %report.property_name,
        manager = %report.manager_name,
        "Processing emergency"
    );

    let fields = match serde_json::to_value(EmergencyFields::from(&report)) {
        Ok(fields) => fields,
        Err(e) => {
            error!(error = %e, "Failed to serialize record fields");
            return logging_failed_response(serde_json::Value::String(e.to_string()));
        },
    };

    match state.store.create_record(&state.config.afterhours_table_name, fields).await {
        Ok(record_id) => {
            info!(record_id = %record_id, "Emergency logged successfully");
            let logged_at = report.timestamp_iso();
            (
                StatusCode::OK,
                Json(EmergencyLoggedResponse {
                    success: true,
                    record_id,
                    message: "Emergency logged successfully".to_string(),
                    logged: true,
                    processed_data: ProcessedData {
                        caller: report.caller_name,
                        emergency_type: report.emergency_type,
                        property: report.property_name,
                        manager: report.manager_name,
                        callback_number: report.callback_number,
                        logged_at,
                    },
                }),
            )
                .into_response()
        },
        Err(e) => {
            error!(error = %e, details = %e.details(), "Emergency logging failed");
            logging_failed_response(e.details())
        },
    }
}

/// Builds the 500 response for an upstream logging failure.
fn logging_failed_response(details: serde_json::Value) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(LoggingFailedResponse {
            success: false,
            logged: false,
            error: "Failed to log emergency".to_string(),
            message: "Emergency logging failed".to_string(),
            details,
        }),
    )
        .into_response()
}
