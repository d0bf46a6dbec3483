//! # Book routes
//!
//! The `/books` CRUD surface. Handlers stay thin: extract, call the store,
//! serialize. Extractor rejections are caught per-handler so every failure
//! shares the `{"error": ...}` body shape.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderName, StatusCode},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;

use crate::catalog::{Book, BookFilter, BookPatch, BookStore, NewBook};

use super::errors::ApiResult;

// ==================
// Shared State
// ==================

/// State shared across book handlers
pub struct ApiState {
    pub store: BookStore,
}

impl ApiState {
    pub fn new(store: BookStore) -> Self {
        Self { store }
    }
}

// ==================
// Request Types
// ==================

/// Query parameters accepted by the list endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListBooksQuery {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

// ==================
// Book Routes
// ==================

/// Create the `/books` routes
pub fn book_routes(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/books", get(list_books_handler))
        .route("/books", post(create_book_handler))
        .route("/books/{id}", get(get_book_handler))
        .route("/books/{id}", put(update_book_handler))
        .route("/books/{id}", delete(delete_book_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

/// List books, optionally narrowed by author/title substring filters
async fn list_books_handler(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<ListBooksQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Book>>> {
    let Query(query) = query?;
    let filter = BookFilter::new(query.author, query.title);

    let books = state.store.list(&filter)?;
    Ok(Json(books))
}

/// Fetch a single book by id
async fn get_book_handler(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<Json<Book>> {
    let Path(id) = path?;

    let book = state.store.get(id)?;
    Ok(Json(book))
}

/// Create a book; the response points at the new resource via `Location`
async fn create_book_handler(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<NewBook>, JsonRejection>,
) -> ApiResult<(StatusCode, [(HeaderName, String); 1], Json<Book>)> {
    let Json(new_book) = payload?;

    let book = state.store.create(new_book)?;
    let location = format!("/books/{}", book.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(book),
    ))
}

/// Apply a sparse patch to an existing book
async fn update_book_handler(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<u64>, PathRejection>,
    payload: Result<Json<BookPatch>, JsonRejection>,
) -> ApiResult<Json<Book>> {
    let Path(id) = path?;
    let Json(patch) = payload?;

    let book = state.store.update(id, patch)?;
    Ok(Json(book))
}

/// Remove a book
async fn delete_book_handler(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = path?;

    state.store.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
