//! Error types for emergency report construction.
//!
//! The intake path has a single client-recoverable failure: the caller name
//! or emergency type resolving empty after normalization. The handler maps
//! it to a 400 response carrying the fixed required-field list.

use thiserror::Error;

/// Result type alias using `ReportError`.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors raised while building an emergency report from tool-call args.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// A required field resolved empty after trimming.
    #[error("Missing required emergency data")]
    MissingRequiredData,
}

impl ReportError {
    /// Argument names the caller must supply for an emergency to be logged.
    ///
    /// Reported verbatim in the 400 response body so the telephony platform
    /// can resubmit with corrected data.
    pub fn required_fields() -> [&'static str; 2] {
        ["caller", "emergency_type"]
    }
}
