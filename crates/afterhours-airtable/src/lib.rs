//! Airtable REST client for emergency record creation.
//!
//! Provides the narrow [`RecordStore`] seam the intake handler writes
//! through, the production [`AirtableClient`] implementation backed by
//! reqwest, and an in-memory mock for tests. One record-create call per
//! inbound emergency; no retries, no batching.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod store;

pub use client::{AirtableClient, ClientConfig};
pub use error::{AirtableError, Result};
pub use store::RecordStore;
