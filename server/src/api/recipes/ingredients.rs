use crate::api::{stored_id, ApiError};
use crate::dto::IngredientDto;
use crate::mapping::ingredients_of;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

#[utoipa::path(
    get,
    path = "/recipes/{id}/ingredients",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Ingredients associated to the recipe", body = Vec<IngredientDto>),
        (status = 404, description = "Recipe not found")
    )
)]
pub async fn list_recipe_ingredients(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<IngredientDto>>, ApiError> {
    let id = stored_id(id)?;
    let Some((recipe, ingredients)) = state.recipes.ingredients(id)? else {
        tracing::debug!(id, "recipe not found");
        return Err(ApiError::NotFound);
    };

    Ok(Json(ingredients_of(&recipe, ingredients)))
}
