use crate::AppState;
use axum::{response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Returns the router for /health
pub fn router() -> Router<AppState> {
    Router::new().route(HEALTH_PATH, get(health))
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[derive(OpenApi)]
#[openapi(paths(health), components(schemas(HealthResponse)))]
pub struct ApiDoc;
