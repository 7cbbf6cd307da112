//! Clock trait for injected time.
//!
//! The `SystemClock` adapter lives in skillmart-infra.

use chrono::{DateTime, Utc};

/// Source of "now" for services.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
