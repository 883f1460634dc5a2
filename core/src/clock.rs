//! Injectable time source.
//!
//! The activation algorithm in `event.rs` only ever looks at *differences*
//! between two readings, never the absolute value — any monotonically
//! advancing, second-resolution source satisfies it. `SystemClock` is the
//! production implementation; `FakeClock` drives the deterministic tests in
//! `tests/` without real sleeps.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A source of monotonic instants.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wraps `std::time::Instant::now()`. The only `Clock` used outside tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A manually advanced clock for tests. Starts at an arbitrary fixed
/// instant and only moves when `advance` is called, so hazard and
/// threshold tests never race a real clock.
#[derive(Clone)]
pub struct FakeClock {
    inner: Arc<Mutex<Instant>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut guard = self.inner.lock().expect("fake clock poisoned");
        *guard += by;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        *self.inner.lock().expect("fake clock poisoned")
    }
}

