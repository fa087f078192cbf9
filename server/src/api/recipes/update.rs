use crate::api::{stored_id, ApiError, ErrorResponse, ValidatedJson, ValidationErrorResponse};
use crate::dto::RecipeDto;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

#[utoipa::path(
    put,
    path = "/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    request_body = RecipeDto,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeDto),
        (status = 400, description = "Invalid request", body = ValidationErrorResponse),
        (status = 404, description = "Recipe not found"),
        (status = 500, description = "Store failure, including a duplicate name", body = ErrorResponse)
    )
)]
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<RecipeDto>,
) -> Result<Json<RecipeDto>, ApiError> {
    let id = stored_id(id)?;
    let Some(updated) = state.recipes.update(id, &request.as_form())? else {
        tracing::debug!(id, "recipe not found");
        return Err(ApiError::NotFound);
    };

    Ok(Json(updated.into()))
}
