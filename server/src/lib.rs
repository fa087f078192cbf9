pub mod api;
pub mod config;
pub mod db;
pub mod dto;
pub mod mapping;
pub mod models;
pub mod repository;
pub mod schema;
pub mod service;
pub mod telemetry;

use std::time::Duration;

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::Request;
use axum::middleware;
use axum::response::Response;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{Level, Span};
use utoipa_swagger_ui::SwaggerUi;

use db::DbPool;
use service::{IngredientService, RecipeService};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub recipes: RecipeService,
    pub ingredients: IngredientService,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        Self {
            recipes: RecipeService::new(pool.clone()),
            ingredients: IngredientService::new(pool),
        }
    }
}

/// Builds the full application: resource routes, docs UI and the
/// logging/query-counting middleware.
pub fn app(state: AppState) -> Router {
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    Router::new()
        .merge(api::router())
        .merge(swagger_ui)
        .with_state(state)
        .layer(middleware::from_fn(
            telemetry::db_query_count_header_middleware,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_response(log_response),
        )
        .layer(middleware::from_fn(telemetry::query_counting_middleware))
}

fn request_span(request: &Request<Body>) -> Span {
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or(request.uri().path(), MatchedPath::as_str);

    // Polled by orchestrators; keep it out of the default log level
    if path == api::health::HEALTH_PATH {
        return tracing::trace_span!("http_request");
    }
    tracing::info_span!("http_request", method = %request.method(), path)
}

fn log_response(response: &Response, latency: Duration, span: &Span) {
    if span.metadata().is_some_and(|meta| *meta.level() == Level::TRACE) {
        return;
    }

    let status = response.status();
    let latency_ms = latency.as_millis() as u64;
    if status.is_server_error() {
        tracing::error!(%status, latency_ms, "request failed with server error");
    } else {
        tracing::info!(%status, latency_ms, "request completed");
    }
}
