use crate::api::{stored_id, ApiError, ErrorResponse, ValidatedJson, ValidationErrorResponse};
use crate::dto::IngredientDto;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

#[utoipa::path(
    put,
    path = "/ingredients/{id}",
    tag = "ingredients",
    params(
        ("id" = i64, Path, description = "Ingredient ID")
    ),
    request_body = IngredientDto,
    responses(
        (status = 200, description = "Ingredient updated", body = IngredientDto),
        (status = 400, description = "Invalid request or unknown recipe id", body = ValidationErrorResponse),
        (status = 404, description = "Ingredient not found"),
        (status = 500, description = "Store failure, including a duplicate name", body = ErrorResponse)
    )
)]
pub async fn update_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<IngredientDto>,
) -> Result<Json<IngredientDto>, ApiError> {
    let id = stored_id(id)?;
    let Some(updated) = state.ingredients.update(id, &request.as_draft())? else {
        tracing::debug!(id, "ingredient not found");
        return Err(ApiError::NotFound);
    };

    Ok(Json(updated.into()))
}
