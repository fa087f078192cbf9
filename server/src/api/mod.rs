pub mod error;
pub mod health;
pub mod ingredients;
pub mod recipes;

use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::dto::FieldViolation;
use crate::AppState;

pub use error::{stored_id, ApiError, ValidatedJson};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body of a 400 caused by field validation
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub error: String,
    pub violations: Vec<FieldViolation>,
}

/// All resource routes, without the docs UI or middleware
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(recipes::router())
        .merge(ingredients::router())
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "restaurant-server", description = "Recipes and their ingredients"),
        components(schemas(ErrorResponse, ValidationErrorResponse, FieldViolation))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        health::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
        ingredients::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let spec = openapi();

        for path in [
            "/health",
            "/recipes",
            "/recipes/{id}",
            "/recipes/{id}/ingredients",
            "/ingredients",
            "/ingredients/{id}",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_openapi_has_shared_schemas() {
        let spec = openapi();
        let schemas = &spec.components.unwrap().schemas;

        for name in [
            "ErrorResponse",
            "ValidationErrorResponse",
            "RecipeDto",
            "IngredientDto",
        ] {
            assert!(schemas.contains_key(name), "missing schema {name}");
        }
    }
}
