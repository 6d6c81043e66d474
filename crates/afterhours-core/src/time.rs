//! Clock abstraction for testable timestamps.
//!
//! The report timestamp is generated at request-handling time; injecting
//! the clock lets tests pin it to a known value and assert the exact
//! outbound field map.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

/// Source of the current time.
///
/// Production code uses [`RealClock`]; tests inject [`TestClock`] to
/// control timestamps deterministically.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Returns the current UTC time.
    fn now_utc(&self) -> DateTime<Utc>;
}

/// System-time clock used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealClock;

impl RealClock {
    /// Creates a new real clock instance.
    pub fn new() -> Self {
        Self
    }
}

impl Clock for RealClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Controllable clock for deterministic tests.
#[derive(Debug, Clone)]
pub struct TestClock {
    current: Arc<Mutex<DateTime<Utc>>>,
}

impl TestClock {
    /// Creates a test clock pinned to the given time.
    pub fn at(start: DateTime<Utc>) -> Self {
        Self { current: Arc::new(Mutex::new(start)) }
    }

    /// Advances the clock by the given duration.
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *current += duration;
    }

    /// Jumps the clock to a specific time.
    pub fn set(&self, time: DateTime<Utc>) {
        let mut current = self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = time;
    }
}

impl Clock for TestClock {
    fn now_utc(&self) -> DateTime<Utc> {
        *self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
