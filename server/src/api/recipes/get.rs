use crate::api::{stored_id, ApiError};
use crate::dto::RecipeDto;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

#[utoipa::path(
    get,
    path = "/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeDto),
        (status = 404, description = "Recipe not found")
    )
)]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RecipeDto>, ApiError> {
    let id = stored_id(id)?;
    let Some(recipe) = state.recipes.find_by_id(id)? else {
        tracing::debug!(id, "recipe not found");
        return Err(ApiError::NotFound);
    };

    Ok(Json(recipe.into()))
}
