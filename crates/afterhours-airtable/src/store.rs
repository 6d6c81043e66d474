//! Record-store abstraction over the tabular backend.
//!
//! The intake handler only needs one operation: create a record in a named
//! table from a field map. Abstracting it behind a trait lets tests
//! substitute an in-memory stand-in and assert call counts and payloads
//! without network access.

use std::{future::Future, pin::Pin};

use serde_json::Value;

use crate::error::Result;

/// Storage operations required by the emergency intake path.
pub trait RecordStore: Send + Sync + 'static {
    /// Creates one record in `table` from the given field map.
    ///
    /// Returns the backend's identifier for the created record. A failure
    /// is terminal for the calling request; no retry is attempted.
    fn create_record<'a>(
        &'a self,
        table: &'a str,
        fields: Value,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;
}

pub mod mock {
    //! Mock record store for testing without network access.
    //!
    //! Records every create call for payload assertions and serves a
    //! configured outcome, either a record id or an error.

    use std::sync::Mutex;

    use super::*;
    use crate::error::AirtableError;

    /// One recorded create-record call.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RecordedCall {
        /// Table name the record was created in.
        pub table: String,
        /// Field map sent with the call.
        pub fields: Value,
    }

    /// In-memory record store serving configured outcomes.
    pub struct MockRecordStore {
        calls: Mutex<Vec<RecordedCall>>,
        outcome: Mutex<std::result::Result<String, AirtableError>>,
    }

    impl MockRecordStore {
        /// Creates a mock store that answers every call with `rec_mock`.
        pub fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                outcome: Mutex::new(Ok("rec_mock".to_string())),
            }
        }

        /// Configures the record id returned by subsequent calls.
        pub fn respond_with_record_id(&self, record_id: impl Into<String>) {
            let mut outcome =
                self.outcome.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            *outcome = Ok(record_id.into());
        }

        /// Configures subsequent calls to fail with the given error.
        pub fn respond_with_error(&self, error: AirtableError) {
            let mut outcome =
                self.outcome.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            *outcome = Err(error);
        }

        /// Number of create calls received so far.
        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
        }

        /// All recorded calls, in arrival order.
        pub fn recorded_calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
        }
    }

    impl Default for MockRecordStore {
        fn default() -> Self {
            Self::new()
        }
    }

    impl RecordStore for MockRecordStore {
        fn create_record<'a>(
            &'a self,
            table: &'a str,
            fields: Value,
        ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
            Box::pin(async move {
                self.calls
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .push(RecordedCall { table: table.to_string(), fields });
                self.outcome.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
            })
        }
    }

}
