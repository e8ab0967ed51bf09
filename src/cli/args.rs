//! CLI argument definitions using clap
//!
//! Commands:
//! - bloglist serve [--config <path>] [--port <n>]
//! - bloglist stats --input <posts.json>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// bloglist - a minimal blog list REST API
#[derive(Parser, Debug)]
#[command(name = "bloglist")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on, overriding config and environment
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print list statistics for a JSON array of posts
    Stats {
        /// File holding the posts
        #[arg(long)]
        input: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
