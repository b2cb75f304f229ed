use crate::clock::Clock;
use crate::stopwatch::{Lap, Stopwatch};
use crate::storage::{Persistence, Store};
use crate::ticker::Ticker;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

mod command;

pub use command::{Command, CommandParseError};

pub const DEFAULT_REFRESH: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Command(Command),
    /// Periodic display refresh while running.
    Tick,
}

/// Which controls the presentation layer should offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub start: bool,
    pub stop: bool,
    pub lap: bool,
    pub reset: bool,
}

impl Controls {
    pub fn for_running(running: bool) -> Self {
        Self {
            start: !running,
            stop: running,
            lap: running,
            reset: true,
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub elapsed_ms: u64,
    pub running: bool,
    pub controls: Controls,
    pub laps: &'a [Lap],
}

pub trait Renderer {
    fn render(&mut self, view: View<'_>) -> anyhow::Result<()>;
}

/// A stopwatch bound to its persistence and its refresh task.
///
/// The refresh [`Ticker`] exists exactly while the stopwatch is running. It is
/// spawned on `runtime`, so every operation can be called from plain
/// synchronous code.
pub struct Widget<C, S> {
    stopwatch: Stopwatch<C>,
    persistence: Persistence<S>,
    runtime: Handle,
    events: UnboundedSender<Event>,
    refresh: Duration,
    ticker: Option<Ticker>,
}

impl<C: Clock, S: Store> Widget<C, S> {
    /// Loads the saved state and starts out stopped.
    pub fn restore(
        clock: C,
        persistence: Persistence<S>,
        runtime: Handle,
        events: UnboundedSender<Event>,
        refresh: Duration,
    ) -> Self {
        let state = persistence.load();
        tracing::debug!(
            accumulated_ms = state.accumulated_ms,
            laps = state.laps.len(),
            "Restored stopwatch"
        );

        Self {
            stopwatch: Stopwatch::restore(clock, state),
            persistence,
            runtime,
            events,
            refresh,
            ticker: None,
        }
    }

    pub fn start(&mut self) {
        if self.stopwatch.is_running() {
            tracing::debug!("Ignoring start while running");
            return;
        }

        self.stopwatch.start();
        self.ticker = Some(Ticker::spawn(&self.runtime, self.refresh, self.events.clone()));
        tracing::info!(elapsed_ms = self.query(), "Started");
    }

    pub fn stop(&mut self) {
        if !self.stopwatch.is_running() {
            tracing::debug!("Ignoring stop while stopped");
            return;
        }

        self.stopwatch.stop();
        self.ticker = None;
        self.save();
        tracing::info!(elapsed_ms = self.query(), "Stopped");
    }

    pub fn reset(&mut self) {
        self.stopwatch.reset();
        self.ticker = None;
        self.save();
        tracing::info!("Reset");
    }

    /// Records a lap while running and saves.
    ///
    /// The saved accumulated time covers completed segments only. Until the
    /// next stop, a reload can show laps larger than the restored elapsed time.
    pub fn lap(&mut self) {
        let Some(lap) = self.stopwatch.lap() else {
            tracing::debug!("Ignoring lap while stopped");
            return;
        };

        tracing::info!(label = %lap.label, elapsed_ms = lap.elapsed_ms, "Lap");
        self.save();
    }

    pub fn query(&self) -> u64 {
        self.stopwatch.query()
    }

    pub fn laps(&self) -> &[Lap] {
        self.stopwatch.laps()
    }

    pub fn is_running(&self) -> bool {
        self.stopwatch.is_running()
    }

    pub fn is_refreshing(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn controls(&self) -> Controls {
        Controls::for_running(self.is_running())
    }

    pub fn view(&self) -> View<'_> {
        View {
            elapsed_ms: self.query(),
            running: self.is_running(),
            controls: self.controls(),
            laps: self.laps(),
        }
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    /// Applies one event. Returns whether the display needs redrawing.
    pub fn handle(&mut self, event: Event) -> bool {
        match event {
            Event::Command(Command::Start) => self.start(),
            Event::Command(Command::Stop) => self.stop(),
            Event::Command(Command::Reset) => self.reset(),
            Event::Command(Command::Lap) => self.lap(),
            Event::Command(Command::Refresh) => {}
            Event::Command(Command::Quit) => return false,
            // Ticks queued before a stop can still arrive afterwards.
            Event::Tick => return self.is_running(),
        }
        true
    }

    fn save(&mut self) {
        self.persistence.save(&self.stopwatch.saved_state());
    }
}

/// Drives the widget until [`Command::Quit`] arrives.
pub async fn run<C, S, R>(
    mut widget: Widget<C, S>,
    mut events: UnboundedReceiver<Event>,
    renderer: &mut R,
) -> anyhow::Result<()>
where
    C: Clock,
    S: Store,
    R: Renderer,
{
    renderer.render(widget.view())?;

    while let Some(event) = events.recv().await {
        tracing::trace!(?event, "Handling event");

        if event == Event::Command(Command::Quit) {
            break;
        }

        if widget.handle(event) {
            renderer.render(widget.view())?;
        }
    }

    Ok(())
}
