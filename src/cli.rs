use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(author, version, about = "A terminal stopwatch with laps", long_about = None)]
pub struct Arguments {
    #[arg(short = 'v', long = None, action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Directory holding the saved stopwatch state.
    #[arg(short, long, default_value = ".lapwatch")]
    pub state_dir: PathBuf,

    /// Display refresh period while running, in milliseconds.
    #[arg(short, long, default_value_t = 200, value_parser = clap::value_parser!(u64).range(1..))]
    pub refresh_ms: u64,
}
