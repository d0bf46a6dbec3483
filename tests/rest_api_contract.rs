//! REST API Contract Tests
//!
//! Exercises the full HTTP surface against the real router:
//! - Status codes and bodies for every route
//! - The `{"error": ...}` body shape on all failures
//! - Location header on create
//! - Query-parameter filtering

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use bookshelf::catalog::{Book, BookStore};
use bookshelf::rest_api::RestServer;

// =============================================================================
// Helper Functions
// =============================================================================

fn seeded_app() -> Router {
    RestServer::new(BookStore::seeded()).router()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// List Tests
// =============================================================================

/// GET /books returns the whole collection in insertion order.
#[tokio::test]
async fn test_list_books_returns_seed_in_order() {
    let app = seeded_app();
    let response = app.oneshot(get("/books")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let books = body.as_array().unwrap();
    assert_eq!(books.len(), 2);
    assert_eq!(books[0]["title"], "Pride and Prejudice");
    assert_eq!(books[1]["title"], "1984");
    assert_eq!(books[0]["isbn"], "1111111111");
}

/// The author query filter matches case-insensitive substrings.
#[tokio::test]
async fn test_list_books_author_filter_case_insensitive() {
    let app = seeded_app();

    for needle in ["orwell", "ORWELL", "Orwe"] {
        let response = app
            .clone()
            .oneshot(get(&format!("/books?author={}", needle)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let books = body.as_array().unwrap();
        assert_eq!(books.len(), 1, "needle {:?}", needle);
        assert_eq!(books[0]["author"], "George Orwell");
    }
}

/// Author and title filters compose with AND.
#[tokio::test]
async fn test_list_books_filters_compose() {
    let app = seeded_app();

    let response = app
        .clone()
        .oneshot(get("/books?author=orwell&title=1984"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let response = app
        .oneshot(get("/books?author=orwell&title=pride"))
        .await
        .unwrap();
    assert!(body_json(response).await.as_array().unwrap().is_empty());
}

/// Empty filter values behave like no filter at all.
#[tokio::test]
async fn test_list_books_empty_filter_params_are_ignored() {
    let app = seeded_app();
    let response = app.oneshot(get("/books?author=&title=")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
}

// =============================================================================
// Get Tests
// =============================================================================

/// GET /books/{id} returns the single record.
#[tokio::test]
async fn test_get_book_by_id() {
    let app = seeded_app();
    let response = app.oneshot(get("/books/1")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["author"], "Jane Austen");
    assert_eq!(body["year"], 1813);
}

/// Missing ids produce the canonical 404 body.
#[tokio::test]
async fn test_get_missing_book_is_404() {
    let app = seeded_app();
    let response = app.oneshot(get("/books/99")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({"error": "Book not found"}));
}

/// A non-integer id is a 400 with the same error body shape.
#[tokio::test]
async fn test_get_non_integer_id_is_400_json() {
    let app = seeded_app();
    let response = app.oneshot(get("/books/abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].is_string());
}

// =============================================================================
// Create Tests
// =============================================================================

/// POST /books creates a record, returns 201 with a Location header.
#[tokio::test]
async fn test_create_book_returns_201_with_location() {
    let app = seeded_app();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/books",
            json!({"title": "Dune", "author": "Frank Herbert", "year": 1965}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/books/3"
    );

    let body = body_json(response).await;
    assert_eq!(body["id"], 3);
    assert_eq!(body["title"], "Dune");
    assert_eq!(body["isbn"], Value::Null);

    // The new record is visible in the collection.
    let response = app.oneshot(get("/books/3")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

/// Missing required fields are rejected by the schema with a 400.
#[tokio::test]
async fn test_create_book_missing_author_is_400() {
    let app = seeded_app();
    let response = app
        .clone()
        .oneshot(json_request("POST", "/books", json!({"title": "Solo"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());

    // Nothing was stored.
    let response = app.oneshot(get("/books")).await.unwrap();
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
}

/// Empty required fields are rejected by the store with its fixed
/// message.
#[tokio::test]
async fn test_create_book_empty_title_is_400() {
    let app = seeded_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/books",
            json!({"title": "", "author": "X"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Missing 'title' or 'author'"})
    );
}

/// A body that is not JSON at all is a 400, not a 415/422.
#[tokio::test]
async fn test_create_book_malformed_body_is_400() {
    let app = seeded_app();
    let request = Request::builder()
        .method("POST")
        .uri("/books")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

/// Wrong-typed fields never crash the handler; they surface as a 400.
#[tokio::test]
async fn test_create_book_wrong_typed_year_is_400() {
    let app = seeded_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/books",
            json!({"title": "T", "author": "A", "year": "nineteen"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Unknown body keys are ignored, matching the permissive source schema.
#[tokio::test]
async fn test_create_book_ignores_unknown_fields() {
    let app = seeded_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/books",
            json!({"title": "T", "author": "A", "publisher": "ignored"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}

// =============================================================================
// Update Tests
// =============================================================================

/// PUT applies a sparse patch: present fields change, absent fields stay.
#[tokio::test]
async fn test_update_book_sparse_patch() {
    let app = seeded_app();
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/books/2",
            json!({"title": "Nineteen Eighty-Four"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "Nineteen Eighty-Four");
    assert_eq!(body["author"], "George Orwell");
    assert_eq!(body["year"], 1949);

    // Explicit null clears an optional field.
    let response = app
        .oneshot(json_request("PUT", "/books/2", json!({"isbn": null})))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["isbn"], Value::Null);
}

/// Updating a missing id is a 404.
#[tokio::test]
async fn test_update_missing_book_is_404() {
    let app = seeded_app();
    let response = app
        .oneshot(json_request("PUT", "/books/99", json!({"title": "X"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({"error": "Book not found"}));
}

/// A malformed update body is a 400 even when the id exists.
#[tokio::test]
async fn test_update_malformed_body_is_400() {
    let app = seeded_app();
    let request = Request::builder()
        .method("PUT")
        .uri("/books/1")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Delete Tests
// =============================================================================

/// DELETE returns 204 with an empty body; a second delete is a 404.
#[tokio::test]
async fn test_delete_book_then_404() {
    let app = seeded_app();

    let response = app.clone().oneshot(delete("/books/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());

    let response = app.oneshot(delete("/books/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Deleted ids are never reassigned by later creates.
#[tokio::test]
async fn test_deleted_id_is_not_reused_over_http() {
    let app = seeded_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/books",
            json!({"title": "A", "author": "B"}),
        ))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["id"], 3);

    let response = app.clone().oneshot(delete("/books/3")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(json_request(
            "POST",
            "/books",
            json!({"title": "C", "author": "D"}),
        ))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["id"], 4);
}

// =============================================================================
// End-to-End Scenario
// =============================================================================

/// The full lifecycle over a one-book collection: create, read, delete,
/// read again.
#[tokio::test]
async fn test_create_get_delete_scenario() {
    let store = BookStore::with_books(vec![Book {
        id: 1,
        title: "1984".to_string(),
        author: "George Orwell".to_string(),
        year: None,
        isbn: None,
    }]);
    let app = RestServer::new(store).router();

    // Create returns the fully-populated record with nulls spelled out.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/books",
            json!({"title": "Dune", "author": "Frank Herbert"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        body_json(response).await,
        json!({
            "id": 2,
            "title": "Dune",
            "author": "Frank Herbert",
            "year": null,
            "isbn": null
        })
    );

    let response = app.clone().oneshot(get("/books/2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(delete("/books/2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get("/books/2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Health Check
// =============================================================================

/// The health endpoint reports ok without touching the collection.
#[tokio::test]
async fn test_health_endpoint() {
    let app = seeded_app();
    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}
