use crate::api::{ApiError, ErrorResponse};
use crate::dto::IngredientDto;
use crate::AppState;
use axum::{extract::State, Json};

#[utoipa::path(
    get,
    path = "/ingredients",
    tag = "ingredients",
    responses(
        (status = 200, description = "All ingredients with their recipe, if any", body = Vec<IngredientDto>),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_ingredients(
    State(state): State<AppState>,
) -> Result<Json<Vec<IngredientDto>>, ApiError> {
    let ingredients = state.ingredients.find_all()?;

    Ok(Json(
        ingredients.into_iter().map(IngredientDto::from).collect(),
    ))
}
