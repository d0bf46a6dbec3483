//! CLI module for bookshelf
//!
//! Provides the command-line interface:
//! - serve: boot the catalog HTTP server

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{load_config, run, serve};
pub use errors::{CliError, CliResult};
