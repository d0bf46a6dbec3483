//! # REST API module
//!
//! HTTP surface for the book catalog: route registration, request
//! validation, and the mapping from catalog errors to status codes.

pub mod config;
pub mod errors;
pub mod routes;
pub mod server;

pub use config::ServerConfig;
pub use errors::{ApiError, ApiResult, ErrorBody};
pub use routes::{book_routes, ApiState, ListBooksQuery};
pub use server::RestServer;
