//! CLI module for bloglist
//!
//! Provides command-line interface for:
//! - serve: Run the HTTP API
//! - stats: Offline list statistics over a JSON file of posts

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{run_command, serve, stats};
pub use errors::{CliError, CliErrorCode, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}
