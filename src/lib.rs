//! bookshelf - a minimal in-memory book catalog service with a REST API
//!
//! The `catalog` module owns the record store and its CRUD contract; the
//! `rest_api` module exposes it over HTTP; the `cli` module boots the
//! process.

pub mod catalog;
pub mod cli;
pub mod rest_api;
