//! CLI command implementations

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::blog::{ListStats, Post};
use crate::config::AppConfig;
use crate::http_server::HttpServer;
use crate::observability::{Event, Logger};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::Stats { input } => stats(&input, &mut io::stdout()),
    }
}

/// Load configuration and run the HTTP server on a tokio runtime
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = AppConfig::load(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
        config.validate()?;
    }

    let addr = config.server.socket_addr();
    Logger::event(Event::ConfigLoaded, &[("addr", addr.as_str())]);

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to start runtime: {}", e)))?;

    runtime
        .block_on(HttpServer::new(&config).start())
        .map_err(|e| {
            let message = e.to_string();
            Logger::event(Event::ServerFailed, &[("error", message.as_str())]);
            CliError::serve_failed(message)
        })
}

/// Read posts from `input` and write their statistics as JSON
pub fn stats<W: Write>(input: &Path, out: &mut W) -> CliResult<()> {
    let content = fs::read_to_string(input).map_err(|e| {
        CliError::io_error(format!("Failed to read {}: {}", input.display(), e))
    })?;

    let posts: Vec<Post> = serde_json::from_str(&content)
        .map_err(|e| CliError::invalid_input(format!("Expected a JSON array of posts: {}", e)))?;

    let rendered = serde_json::to_string_pretty(&ListStats::compute(&posts))
        .map_err(|e| CliError::io_error(format!("JSON error: {}", e)))?;

    writeln!(out, "{}", rendered)?;
    Ok(())
}
