mod cli;

use crate::cli::Arguments;
use clap::Parser;
use lapwatch::clock::MonotonicClock;
use lapwatch::console::Terminal;
use lapwatch::storage::{FileStore, Persistence};
use lapwatch::widget::{self, Command, Event, Widget};
use std::io::{self, BufRead};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing_log::LogTracer;

fn main() {
    let arguments = Arguments::parse();
    if let Err(e) = set_log_level(&arguments) {
        eprintln!("Failed to configure logging: {e}");
        return;
    }

    tracing::debug!(?arguments, "starting stopwatch");

    if let Err(e) = run(arguments) {
        tracing::error!(%e, "Unable to run the stopwatch");
    }
}

fn set_log_level(arguments: &Arguments) -> anyhow::Result<()> {
    LogTracer::init()?;

    let level = match arguments.verbosity {
        0 => tracing::Level::ERROR,
        1 => tracing::Level::WARN,
        2 => tracing::Level::INFO,
        3 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .with_file(true)
        .with_line_number(true)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn run(arguments: Arguments) -> anyhow::Result<()> {
    // Every widget operation runs on this one thread.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let handle = runtime.handle().clone();

    let result = runtime.block_on(async {
        let (sender, receiver) = tokio::sync::mpsc::unbounded_channel();

        let store = FileStore::new(arguments.state_dir);
        tracing::debug!(directory = ?store.directory(), "Using state directory");

        let widget = Widget::restore(
            MonotonicClock::default(),
            Persistence::new(store),
            handle,
            sender.clone(),
            Duration::from_millis(arguments.refresh_ms),
        );

        tokio::task::spawn_blocking(move || {
            if let Err(e) = read_loop(io::stdin().lock(), &sender) {
                tracing::error!(%e, "Failed to read commands");
            }
            // Input is gone; nothing can drive the widget anymore.
            let _ = sender.send(Event::Command(Command::Quit));
        });

        let mut terminal = Terminal::new(io::stdout());
        widget::run(widget, receiver, &mut terminal).await?;
        println!();

        Ok::<(), anyhow::Error>(())
    });

    // The reader stays blocked on stdin after a quit command.
    runtime.shutdown_background();

    result
}

fn read_loop(input: impl BufRead, sender: &UnboundedSender<Event>) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(command) => sender.send(Event::Command(command))?,
            Err(e) => tracing::warn!(%e, "Ignoring input"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_read_loop_forwards_commands() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let input = io::Cursor::new("start\n\nbogus\nl\n  stop  \nq\n");

        read_loop(input, &sender).unwrap();

        let mut commands = Vec::new();
        while let Ok(event) = receiver.try_recv() {
            commands.push(event);
        }
        assert_eq!(
            commands,
            vec![
                Event::Command(Command::Start),
                Event::Command(Command::Lap),
                Event::Command(Command::Stop),
                Event::Command(Command::Quit),
            ]
        );
    }

    #[test]
    fn test_read_loop_stops_when_widget_is_gone() {
        let (sender, receiver) = mpsc::unbounded_channel();
        drop(receiver);

        assert!(read_loop(io::Cursor::new("start\n"), &sender).is_err());
    }
}
