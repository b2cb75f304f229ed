use crate::widget::Event;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Handle to the periodic display refresh task.
///
/// The task sends [`Event::Tick`] every `period` until the handle is dropped.
/// It runs on the given runtime, so the caller does not need to be inside one.
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn spawn(runtime: &Handle, period: Duration, events: UnboundedSender<Event>) -> Self {
        let handle = runtime.spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            // The first tick completes immediately.
            interval.tick().await;

            loop {
                interval.tick().await;
                if events.send(Event::Tick).is_err() {
                    tracing::debug!("Event loop closed, stopping refresh");
                    break;
                }
            }
        });

        tracing::trace!(?period, "Started display refresh");

        Self { handle }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::trace!("Stopped display refresh");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn drain(receiver: &mut mpsc::UnboundedReceiver<Event>) -> usize {
        let mut count = 0;
        while let Ok(event) = receiver.try_recv() {
            assert_eq!(event, Event::Tick);
            count += 1;
        }
        count
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_at_period() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let _ticker = Ticker::spawn(&Handle::current(), Duration::from_millis(200), sender);

        tokio::time::sleep(Duration::from_millis(650)).await;
        assert_eq!(drain(&mut receiver), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_ticks() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let ticker = Ticker::spawn(&Handle::current(), Duration::from_millis(200), sender);

        tokio::time::sleep(Duration::from_millis(450)).await;
        assert_eq!(drain(&mut receiver), 2);

        drop(ticker);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(drain(&mut receiver), 0);
    }

    #[test]
    fn test_spawn_from_outside_runtime() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let (sender, mut receiver) = mpsc::unbounded_channel();

        let ticker = Ticker::spawn(runtime.handle(), Duration::from_millis(10), sender);
        runtime.block_on(async { tokio::time::sleep(Duration::from_millis(100)).await });
        assert!(drain(&mut receiver) >= 1);

        drop(ticker);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_receiver_closes() {
        let (sender, receiver) = mpsc::unbounded_channel();
        let ticker = Ticker::spawn(&Handle::current(), Duration::from_millis(200), sender);
        drop(receiver);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(ticker.handle.is_finished());
    }
}
