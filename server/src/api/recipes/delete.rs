use crate::api::{stored_id, ApiError, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
};

#[utoipa::path(
    delete,
    path = "/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe deleted; its ingredients lose their association"),
        (status = 404, description = "Recipe not found"),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let id = stored_id(id)?;
    if !state.recipes.delete(id)? {
        tracing::debug!(id, "recipe not found");
        return Err(ApiError::NotFound);
    }

    tracing::info!(id, "deleted recipe");
    Ok(StatusCode::OK)
}
