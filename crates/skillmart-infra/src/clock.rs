//! Wall-clock adapter for the `Clock` port.

use chrono::{DateTime, Utc};
use skillmart_core::service::clock::Clock;

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
