//! HTTP service for the RAG assistant.
//!
//! Exposes the assistant over JSON:
//! - `GET /` question form
//! - `GET /health` service status
//! - `GET /topics` supported topic areas
//! - `POST /ask` answer a question

pub mod error;
pub mod routes;

use axum::routing::{get, post};
use axum::Router;
use ragassist_core::{AppError, AppResult};
use ragassist_knowledge::Assistant;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Build the application router around a shared assistant.
pub fn build_router(assistant: Arc<Assistant>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .route("/topics", get(routes::topics))
        .route("/ask", post(routes::ask))
        .fallback(routes::not_found)
        .with_state(assistant)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Serve until the process is stopped.
pub async fn serve(assistant: Arc<Assistant>, host: &str, port: u16) -> AppResult<()> {
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("RAG Assistant API listening on http://{}", addr);

    axum::serve(listener, build_router(assistant))
        .await
        .map_err(|e| AppError::Other(format!("Server error: {}", e)))
}
