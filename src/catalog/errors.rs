//! # Catalog errors
//!
//! Error types for store operations. This module stays HTTP-free; the
//! REST layer owns the mapping to status codes.

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors produced by store operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No book with the requested id
    #[error("Book not found")]
    NotFound,

    /// Input rejected before any mutation took place
    #[error("{0}")]
    Validation(String),

    /// Collection lock poisoned
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// Build a validation error from any message
    pub fn validation(msg: impl Into<String>) -> Self {
        CatalogError::Validation(msg.into())
    }
}
