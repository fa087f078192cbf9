use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::Validate;

use super::{ErrorResponse, ValidationErrorResponse};
use crate::db::StoreError;
use crate::dto::{violations, FieldViolation};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,

    #[error("request failed validation")]
    Validation(Vec<FieldViolation>),

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Validation(violations) => validation_failed(violations),
            ApiError::MalformedBody(reason) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse { error: reason }),
            )
                .into_response(),
            ApiError::Store(StoreError::MissingReference { table, id }) => {
                validation_failed(vec![FieldViolation {
                    field: format!("{table}.id"),
                    code: "missing_reference".to_string(),
                    message: format!("no {table} with id {id}"),
                }])
            }
            ApiError::Store(e) => {
                tracing::error!(error = %e, "store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

fn validation_failed(violations: Vec<FieldViolation>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ValidationErrorResponse {
            error: "Validation failed".to_string(),
            violations,
        }),
    )
        .into_response()
}

/// Narrows a path id to the stored key type. Ids outside that range cannot
/// name a row, so they are reported as not found.
pub fn stored_id(id: i64) -> Result<i32, ApiError> {
    i32::try_from(id).map_err(|_| {
        tracing::debug!(id, "id outside the stored key range");
        ApiError::NotFound
    })
}

/// JSON body extractor that rejects the request with 400 when the body does
/// not parse or fails its `Validate` rules, before the handler runs.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(request, state)
            .await
            .map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| ApiError::Validation(violations(&errors)))?;

        Ok(ValidatedJson(value))
    }
}
