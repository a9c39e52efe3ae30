//! Time source used for expiry decisions

use chrono::{DateTime, Utc};

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(any(test, feature = "mock"))]
pub use manual::ManualClock;

#[cfg(any(test, feature = "mock"))]
mod manual {
    use std::sync::{Arc, Mutex, PoisonError};

    use chrono::{DateTime, Duration, Utc};

    use super::Clock;

    /// Clock that only moves when told to
    ///
    /// Clones share the same instant, so a test can keep one handle and
    /// give another to the service.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        now: Arc<Mutex<DateTime<Utc>>>,
    }

    impl ManualClock {
        pub fn new(start: DateTime<Utc>) -> Self {
            Self {
                now: Arc::new(Mutex::new(start)),
            }
        }

        /// Move the clock forward (or backward for negative durations)
        pub fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
            *now += by;
        }

        pub fn set(&self, instant: DateTime<Utc>) {
            *self.now.lock().unwrap_or_else(PoisonError::into_inner) = instant;
        }
    }

    impl Default for ManualClock {
        fn default() -> Self {
            Self::new(Utc::now())
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }
}
