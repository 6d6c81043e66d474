//! After-hours emergency intake HTTP API.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::sync::Arc;

use afterhours_airtable::RecordStore;
use afterhours_core::Clock;

pub mod config;
pub mod handlers;
pub mod server;

pub use config::Config;
pub use server::{create_router, start_server};

/// Shared application state passed to every handler.
///
/// All members are read-only process-wide state established at startup;
/// requests never mutate it.
#[derive(Clone)]
pub struct AppState {
    /// Immutable service configuration.
    pub config: Arc<Config>,
    /// Outbound record store, the real Airtable client in production.
    pub store: Arc<dyn RecordStore>,
    /// Time source for report timestamps.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Creates application state from its components.
    pub fn new(config: Arc<Config>, store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self { config, store, clock }
    }
}
