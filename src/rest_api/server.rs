//! # REST server
//!
//! Axum-based HTTP server combining the book routes, the health check, and
//! the CORS/trace middleware into one router.

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::catalog::BookStore;

use super::config::ServerConfig;
use super::routes::{book_routes, ApiState};

/// REST server: configuration plus the assembled router
pub struct RestServer {
    config: ServerConfig,
    router: Router,
}

impl RestServer {
    /// Create a server over `store` with default configuration
    pub fn new(store: BookStore) -> Self {
        Self::with_config(store, ServerConfig::default())
    }

    /// Create a server with custom configuration
    pub fn with_config(store: BookStore, config: ServerConfig) -> Self {
        let router = Self::build_router(&config, store);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &ServerConfig, store: BookStore) -> Router {
        let state = Arc::new(ApiState::new(store));

        // No configured origins means permissive CORS
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .merge(book_routes(state))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process exits
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(&addr).await?;
        info!(%addr, "catalog server listening");

        axum::serve(listener, self.router).await
    }
}

// ==================
// Health Check
// ==================

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Health check route at root level
fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
