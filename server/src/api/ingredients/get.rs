use crate::api::{stored_id, ApiError};
use crate::dto::IngredientDto;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

#[utoipa::path(
    get,
    path = "/ingredients/{id}",
    tag = "ingredients",
    params(
        ("id" = i64, Path, description = "Ingredient ID")
    ),
    responses(
        (status = 200, description = "Ingredient details", body = IngredientDto),
        (status = 404, description = "Ingredient not found")
    )
)]
pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<IngredientDto>, ApiError> {
    let id = stored_id(id)?;
    let Some(ingredient) = state.ingredients.find_by_id(id)? else {
        tracing::debug!(id, "ingredient not found");
        return Err(ApiError::NotFound);
    };

    Ok(Json(ingredient.into()))
}
