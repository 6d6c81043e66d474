//! Emergency report entity and the tool-call request shape.
//!
//! An [`EmergencyReport`] is built once per request from the tool-call
//! arguments, never persisted locally, and discarded after the response is
//! sent. [`EmergencyFields`] is its projection into the fixed Airtable
//! column names.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    error::{ReportError, Result},
    normalize::{format_callback_number, required_field, sanitize_field},
};

/// Tool name that routes a call through the emergency intake path.
///
/// Calls naming any other tool are acknowledged with a 200 and ignored so
/// the endpoint can be shared by other tool types without error.
pub const EMERGENCY_TOOL_NAME: &str = "log-the-emergency";

const UNKNOWN_PROPERTY: &str = "Unknown Property";
const UNKNOWN_MANAGER: &str = "Unknown Manager";
const UNKNOWN_COMPANY: &str = "Unknown Company";
const NO_TRANSCRIPT: &str = "No transcript available";

/// Inbound tool-call webhook body.
///
/// All fields default when absent so a structurally light payload still
/// reaches tool-name discrimination instead of being rejected during
/// deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolCallRequest {
    /// Name of the invoked tool.
    #[serde(default)]
    pub name: String,
    /// Tool arguments keyed by argument name.
    #[serde(default)]
    pub args: Map<String, Value>,
    /// Call metadata from the telephony platform. Accepted but unused in
    /// field extraction; reserved for diagnostic logging.
    #[serde(default)]
    pub call: Value,
}

/// Normalized emergency report, immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencyReport {
    /// When the request was handled.
    pub timestamp: DateTime<Utc>,
    /// Name of the person reporting the emergency.
    pub caller_name: String,
    /// Address or name of the affected property.
    pub property_name: String,
    /// Property manager responsible for the property.
    pub manager_name: String,
    /// Management company the caller reached.
    pub company_name: String,
    /// Category of the emergency.
    pub emergency_type: String,
    /// Transcription of the call, when available.
    pub transcript: String,
    /// Formatted callback number.
    pub callback_number: String,
}

impl EmergencyReport {
    /// Builds a report from tool-call arguments.
    ///
    /// Optional fields receive placeholder defaults; `caller` and
    /// `emergency_type` are validated on their trimmed raw values and
    /// reject the report when empty or absent, so a constructed report
    /// always carries non-empty required fields.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::MissingRequiredData`] when the caller name or
    /// emergency type resolves empty.
    pub fn from_args(args: &Map<String, Value>, now: DateTime<Utc>) -> Result<Self> {
        let caller_name = required_field(args.get("caller"));
        let emergency_type = required_field(args.get("emergency_type"));

        let (Some(caller_name), Some(emergency_type)) = (caller_name, emergency_type) else {
            return Err(ReportError::MissingRequiredData);
        };

        Ok(Self {
            timestamp: now,
            caller_name,
            property_name: sanitize_field(args.get("address_of_emergency"), UNKNOWN_PROPERTY),
            manager_name: sanitize_field(args.get("property_manager"), UNKNOWN_MANAGER),
            company_name: sanitize_field(args.get("company_name"), UNKNOWN_COMPANY),
            emergency_type,
            transcript: sanitize_field(args.get("call_transcription"), NO_TRANSCRIPT),
            callback_number: format_callback_number(args.get("callback_number")),
        })
    }

    /// Timestamp rendered in ISO-8601 with millisecond precision.
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Airtable field map for one emergency record.
///
/// Serialized keys are exactly the display names of the target table's
/// columns; the record-create payload wraps this map verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmergencyFields {
    /// "Timestamp" column, ISO-8601.
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    /// "Caller Name" column.
    #[serde(rename = "Caller Name")]
    pub caller_name: String,
    /// "Property Name" column.
    #[serde(rename = "Property Name")]
    pub property_name: String,
    /// "Manager Name" column.
    #[serde(rename = "Manager Name")]
    pub manager_name: String,
    /// "Company Name" column.
    #[serde(rename = "Company Name")]
    pub company_name: String,
    /// "Emergency Type" column.
    #[serde(rename = "Emergency Type")]
    pub emergency_type: String,
    /// "Transcript" column.
    #[serde(rename = "Transcript")]
    pub transcript: String,
    /// "Callback Number" column.
    #[serde(rename = "Callback Number")]
    pub callback_number: String,
}

impl From<&EmergencyReport> for EmergencyFields {
    fn from(report: &EmergencyReport) -> Self {
        Self {
            timestamp: report.timestamp_iso(),
            caller_name: report.caller_name.clone(),
            property_name: report.property_name.clone(),
            manager_name: report.manager_name.clone(),
            company_name: report.company_name.clone(),
            emergency_type: report.emergency_type.clone(),
            transcript: report.transcript.clone(),
            callback_number: report.callback_number.clone(),
        }
    }
}
