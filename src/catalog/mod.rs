//! # Book catalog
//!
//! The core of the service: an in-memory collection of book records with
//! store-assigned ids, sparse updates, and substring filtering. Nothing in
//! this module knows about HTTP; the REST layer calls in and maps errors.

pub mod book;
pub mod errors;
pub mod filter;
pub mod store;

pub use book::{Book, BookPatch, NewBook};
pub use errors::{CatalogError, CatalogResult};
pub use filter::BookFilter;
pub use store::{seed_books, BookStore};
