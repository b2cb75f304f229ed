use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A user action on the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Reset,
    Lap,
    /// The display regained visibility or focus.
    Refresh,
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
pub struct CommandParseError(String);

impl Display for CommandParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown command {:?}", self.0)
    }
}

impl Error for CommandParseError {}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "start" => Ok(Command::Start),
            "p" | "stop" => Ok(Command::Stop),
            "r" | "reset" => Ok(Command::Reset),
            "l" | "lap" => Ok(Command::Lap),
            "f" | "refresh" => Ok(Command::Refresh),
            "q" | "quit" => Ok(Command::Quit),
            _ => Err(CommandParseError(s.trim().to_string())),
        }
    }
}
