use crate::clock::Clock;
use std::time::Duration;

pub mod lap;

pub use lap::{format_hms, Lap};

/// The durable part of a [`Stopwatch`]: everything except the run anchor.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SavedState {
    pub accumulated_ms: u64,
    pub laps: Vec<Lap>,
}

/// Elapsed-time accumulator with lap markers.
///
/// `anchor` holds the clock reading taken at the last start and is present
/// exactly while the stopwatch is running. Laps are kept newest-first.
pub struct Stopwatch<C> {
    clock: C,
    anchor: Option<Duration>,
    accumulated: Duration,
    laps: Vec<Lap>,
}

impl<C: Clock> Stopwatch<C> {
    pub fn new(clock: C) -> Self {
        Self::restore(clock, SavedState::default())
    }

    /// Rebuilds a stopped stopwatch from persisted state.
    pub fn restore(clock: C, state: SavedState) -> Self {
        Self {
            clock,
            anchor: None,
            accumulated: Duration::from_millis(state.accumulated_ms),
            laps: state.laps,
        }
    }

    pub fn start(&mut self) {
        if self.anchor.is_none() {
            self.anchor = Some(self.clock.now());
        }
    }

    pub fn stop(&mut self) {
        if let Some(anchor) = self.anchor.take() {
            self.accumulated += self.clock.now().saturating_sub(anchor);
        }
    }

    pub fn reset(&mut self) {
        self.stop();
        self.accumulated = Duration::ZERO;
        self.laps.clear();
    }

    /// Records a lap while running. Returns `None` when stopped.
    pub fn lap(&mut self) -> Option<&Lap> {
        if !self.is_running() {
            return None;
        }

        let lap = Lap::new(self.query());
        self.laps.insert(0, lap);
        self.laps.first()
    }

    /// Current elapsed time, including the open segment if running.
    pub fn elapsed(&self) -> Duration {
        let current = self
            .anchor
            .map(|anchor| self.clock.now().saturating_sub(anchor))
            .unwrap_or_default();
        self.accumulated + current
    }

    /// Current elapsed time in whole milliseconds.
    pub fn query(&self) -> u64 {
        millis(self.elapsed())
    }

    pub fn is_running(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    pub fn saved_state(&self) -> SavedState {
        SavedState {
            accumulated_ms: millis(self.accumulated),
            laps: self.laps.clone(),
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
