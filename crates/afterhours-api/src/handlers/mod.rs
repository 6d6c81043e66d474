//! HTTP request handlers for the emergency intake API.
//!
//! Handlers follow a consistent pattern:
//! - Tracing for observability, with payloads skip-listed from span fields
//! - All failures converted to structured JSON at the handler boundary
//! - No panics; nothing crashes the process or leaks an unhandled fault
//!
//! # Handler Organization
//!
//! - `intake` - Emergency tool-call webhook processing
//! - `health` - Liveness and configuration presence reporting

pub mod health;
pub mod intake;

// Re-export handlers for convenient access
pub use health::health_check;
pub use intake::emergency_webhook;
