//! CLI-specific error types
//!
//! All CLI errors are fatal: `main` prints them to stderr and exits
//! non-zero.

use thiserror::Error;

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file missing, unreadable, or invalid
    #[error("Config error: {0}")]
    Config(String),

    /// Runtime creation or server failure
    #[error("Server error: {0}")]
    Server(String),
}

impl CliError {
    /// Config error
    pub fn config(msg: impl Into<String>) -> Self {
        CliError::Config(msg.into())
    }

    /// Server error
    pub fn server(msg: impl Into<String>) -> Self {
        CliError::Server(msg.into())
    }
}
