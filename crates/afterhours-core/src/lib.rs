//! Core domain models and field normalization.
//!
//! Provides the transient emergency report entity, the tool-call request
//! shape received from the voice-AI platform, and the normalization rules
//! that turn raw tool-call arguments into the fixed Airtable field map.
//! The API crate depends on these types for request handling.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod normalize;
pub mod report;
pub mod time;

pub use error::{ReportError, Result};
pub use report::{EmergencyFields, EmergencyReport, ToolCallRequest, EMERGENCY_TOOL_NAME};
pub use time::{Clock, RealClock, TestClock};
