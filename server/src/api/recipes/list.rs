use crate::api::{ApiError, ErrorResponse};
use crate::dto::RecipeDto;
use crate::AppState;
use axum::{extract::State, Json};

#[utoipa::path(
    get,
    path = "/recipes",
    tag = "recipes",
    responses(
        (status = 200, description = "All recipes", body = Vec<RecipeDto>),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_recipes(State(state): State<AppState>) -> Result<Json<Vec<RecipeDto>>, ApiError> {
    let recipes = state.recipes.find_all()?;

    Ok(Json(recipes.into_iter().map(RecipeDto::from).collect()))
}
