//! System health and status handlers.

use axum::Json;
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

/// Welcome response
#[derive(Serialize, ToSchema)]
pub struct WelcomeResponse {
    #[schema(example = "Welcome to Estetica Plus!")]
    pub message: String,
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    #[schema(example = "ok")]
    pub status: String,
}

/// Welcome endpoint
#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses(
        (status = 200, description = "Welcome message", body = WelcomeResponse)
    )
)]
#[instrument]
pub async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: crate::welcome().to_string(),
    })
}

/// Health check endpoint
///
/// Returns the current health status of the API
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Health check successful", body = HealthResponse)
    )
)]
#[instrument]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
