use crate::api::{stored_id, ApiError, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
};

#[utoipa::path(
    delete,
    path = "/ingredients/{id}",
    tag = "ingredients",
    params(
        ("id" = i64, Path, description = "Ingredient ID")
    ),
    responses(
        (status = 200, description = "Ingredient deleted"),
        (status = 404, description = "Ingredient not found"),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn delete_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let id = stored_id(id)?;
    if !state.ingredients.delete(id)? {
        tracing::debug!(id, "ingredient not found");
        return Err(ApiError::NotFound);
    }

    tracing::info!(id, "deleted ingredient");
    Ok(StatusCode::OK)
}
