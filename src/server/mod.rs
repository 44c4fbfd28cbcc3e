//! HTTP surface: `POST /api/interpret` and `GET /health`.

pub mod error;

use crate::core::orchestrator::InterpretationService;
use crate::domain::model::{ErrorResponse, InterpretationResponse};
use crate::domain::ports::InterpretationClient;
use crate::utils::error::InterpretError;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Builds the application router around a shared service.
pub fn router<C>(service: Arc<InterpretationService<C>>) -> Router
where
    C: InterpretationClient + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/interpret",
            post(interpret::<C>).fallback(method_not_allowed),
        )
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// POST /api/interpret
async fn interpret<C>(
    State(service): State<Arc<InterpretationService<C>>>,
    body: Bytes,
) -> Result<Json<InterpretationResponse>, ApiError>
where
    C: InterpretationClient + 'static,
{
    let value: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|e| InterpretError::validation(format!("Invalid JSON body: {}", e)))?;

    let result = service.handle(&value).await?;
    Ok(Json(result.into()))
}

async fn method_not_allowed() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            error: "Method not allowed".to_string(),
            details: None,
        }),
    )
}

/// GET /health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
