//! CLI command implementations
//!
//! `serve` loads configuration, seeds the store, and runs the REST server
//! on a tokio runtime. Logging is initialized here so `main` stays a pure
//! delegator.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::catalog::{seed_books, BookStore};
use crate::rest_api::{RestServer, ServerConfig};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse command line arguments and dispatch to the requested command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Command::Serve { config, port } => serve(config.as_deref(), port),
    }
}

/// Start the catalog HTTP server
///
/// Absent config file means defaults; an explicitly given but unreadable
/// file is fatal. `--port` wins over the configured port.
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    init_tracing();

    let mut config = match config_path {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(port) = port {
        config.port = port;
    }

    let seed = seed_books();
    info!(seed = seed.len(), addr = %config.socket_addr(), "starting catalog server");

    let store = BookStore::with_books(seed);
    let server = RestServer::with_config(store, config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::server(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::server(format!("HTTP server failed: {}", e)))
    })
}

/// Load and validate a configuration file
pub fn load_config(path: &Path) -> CliResult<ServerConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::config(format!("Failed to read {}: {}", path.display(), e)))?;

    let config: ServerConfig = serde_json::from_str(&content)
        .map_err(|e| CliError::config(format!("Invalid config JSON: {}", e)))?;

    config.validate().map_err(CliError::config)?;

    Ok(config)
}

/// Initialize the tracing subscriber: RUST_LOG-aware with "info" fallback
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
