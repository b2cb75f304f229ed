use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A monotonic time source.
///
/// Readings are offsets from an arbitrary origin and must never decrease
/// between two calls on the same clock. Wall-clock time is not a valid
/// implementation.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Production clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that only moves when told to. Clones share the same reading.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    reading: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn at(ms: u64) -> Self {
        let clock = Self::default();
        clock.set(ms);
        clock
    }

    pub fn advance(&self, ms: u64) {
        self.reading.set(self.reading.get() + Duration::from_millis(ms));
    }

    /// Moves the clock to an absolute reading. Going backwards is ignored.
    pub fn set(&self, ms: u64) {
        let target = Duration::from_millis(ms);
        if target > self.reading.get() {
            self.reading.set(target);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.reading.get()
    }
}
