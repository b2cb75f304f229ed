use crate::stopwatch::{format_hms, Lap};
use crate::widget::{Renderer, View};
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, queue};
use std::io::Write;

/// Renders the widget onto a terminal.
///
/// The status line is rewritten in place on every frame. The lap list is
/// printed above it whenever it changes.
pub struct Terminal<W> {
    out: W,
    shown_laps: Option<Vec<Lap>>,
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            shown_laps: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn clear_line(&mut self) -> std::io::Result<()> {
        queue!(
            self.out,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine)
        )
    }

    fn write_laps(&mut self, laps: &[Lap]) -> std::io::Result<()> {
        self.clear_line()?;
        if laps.is_empty() {
            writeln!(self.out, "No laps")?;
        }

        let count = laps.len();
        for (index, lap) in laps.iter().enumerate() {
            writeln!(self.out, "Lap {:>3}  {}", count - index, lap.label)?;
        }
        Ok(())
    }
}

impl<W: Write> Renderer for Terminal<W> {
    fn render(&mut self, view: View<'_>) -> anyhow::Result<()> {
        if self.shown_laps.as_deref() != Some(view.laps) {
            self.write_laps(view.laps)?;
            self.shown_laps = Some(view.laps.to_vec());
        }

        let state = if view.running { "running" } else { "stopped" };
        let controls = view.controls;
        let available: Vec<&str> = [
            (controls.start, "[s]tart"),
            (controls.stop, "sto[p]"),
            (controls.lap, "[l]ap"),
            (controls.reset, "[r]eset"),
        ]
        .into_iter()
        .filter_map(|(enabled, label)| enabled.then_some(label))
        .chain(["[q]uit"])
        .collect();

        self.clear_line()?;
        write!(
            self.out,
            "{}  {:<7}  {}",
            format_hms(view.elapsed_ms),
            state,
            available.join(" ")
        )?;
        self.out.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::Controls;

    fn view(elapsed_ms: u64, running: bool, laps: &[Lap]) -> View<'_> {
        View {
            elapsed_ms,
            running,
            controls: Controls::for_running(running),
            laps,
        }
    }

    fn output(terminal: Terminal<Vec<u8>>) -> String {
        String::from_utf8(terminal.into_inner()).unwrap()
    }

    #[test]
    fn test_status_line() {
        let mut terminal = Terminal::new(Vec::new());
        terminal.render(view(1_500, true, &[])).unwrap();

        let text = output(terminal);
        assert!(text.ends_with("00:00:01  running  sto[p] [l]ap [r]eset [q]uit"));
        assert!(text.contains("No laps"));
    }

    #[test]
    fn test_status_line_rewritten_in_place() {
        let mut terminal = Terminal::new(Vec::new());
        terminal.render(view(1_000, true, &[])).unwrap();
        terminal.render(view(2_000, true, &[])).unwrap();

        let text = output(terminal);
        assert!(text.contains("\x1b[1G\x1b[2KNo laps"));
        assert!(text.contains("\x1b[1G\x1b[2K00:00:01  running"));
        assert!(text.contains("\x1b[1G\x1b[2K00:00:02  running"));
        assert!(!text.contains('\r'));
    }

    #[test]
    fn test_stopped_offers_start() {
        let mut terminal = Terminal::new(Vec::new());
        terminal.render(view(0, false, &[])).unwrap();

        let text = output(terminal);
        assert!(text.ends_with("00:00:00  stopped  [s]tart [r]eset [q]uit"));
    }

    #[test]
    fn test_laps_printed_only_on_change() {
        let laps = vec![Lap::new(3_000), Lap::new(1_000)];
        let mut terminal = Terminal::new(Vec::new());

        terminal.render(view(3_200, true, &laps)).unwrap();
        terminal.render(view(3_400, true, &laps)).unwrap();

        let text = output(terminal);
        assert_eq!(text.matches("Lap   2  00:00:03").count(), 1);
        assert_eq!(text.matches("Lap   1  00:00:01").count(), 1);
        assert!(text.find("Lap   2").unwrap() < text.find("Lap   1").unwrap());
    }

    #[test]
    fn test_reset_reprints_empty_list() {
        let laps = vec![Lap::new(1_000)];
        let mut terminal = Terminal::new(Vec::new());

        terminal.render(view(1_000, true, &laps)).unwrap();
        terminal.render(view(0, false, &[])).unwrap();

        let text = output(terminal);
        let after_lap = &text[text.find("Lap   1").unwrap()..];
        assert!(after_lap.contains("No laps"));
    }
}
