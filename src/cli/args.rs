use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "exlock",
    version,
    about = "Hold an exclusive file lock from the command line",
    long_about = None
)]
pub struct Args {
    /// Path of the lock file (created if missing, never deleted)
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Wait for the lock (default)
    #[arg(long, conflicts_with = "no_wait")]
    pub wait: bool,

    /// Fail immediately if locked
    #[arg(long, conflicts_with = "wait")]
    pub no_wait: bool,

    /// Give up after DURATION (e.g. "500ms", "5s", "2m")
    #[arg(short = 't', long, value_name = "DURATION", conflicts_with = "no_wait")]
    pub timeout: Option<String>,

    /// Keep holding the lock for DURATION before releasing
    #[arg(long, value_name = "DURATION")]
    pub hold: Option<String>,

    /// Verbose output
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    pub quiet: bool,
}
