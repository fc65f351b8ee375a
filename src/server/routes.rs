//! Rotas HTTP.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::service::QueryService;
use crate::{WordscopeError, WordscopeResult};

/// Monta o roteador com o serviço como estado.
pub fn router(service: Arc<QueryService>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/healthz", get(health))
        .route("/api/word/:word", get(word))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}

async fn word(State(service): State<Arc<QueryService>>, Path(word): Path<String>) -> Response {
    match service.query(&word).await {
        Ok(record) => Json(record.as_ref()).into_response(),
        Err(WordscopeError::EmptyWord) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Word required" })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Word lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch word data" })),
            )
                .into_response()
        }
    }
}

/// Inicia o servidor em `addr` até receber Ctrl+C.
pub async fn serve(service: Arc<QueryService>, addr: &str) -> WordscopeResult<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        "Wordscope HTTP server listening on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| WordscopeError::Server(e.to_string()))?;

    tracing::info!("Wordscope HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
