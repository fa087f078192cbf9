use crate::api::{ApiError, ErrorResponse, ValidatedJson, ValidationErrorResponse};
use crate::dto::IngredientDto;
use crate::AppState;
use axum::{extract::State, Json};

#[utoipa::path(
    post,
    path = "/ingredients",
    tag = "ingredients",
    request_body = IngredientDto,
    responses(
        (status = 200, description = "Ingredient created", body = IngredientDto),
        (status = 400, description = "Invalid request or unknown recipe id", body = ValidationErrorResponse),
        (status = 500, description = "Store failure, including a duplicate name", body = ErrorResponse)
    )
)]
pub async fn create_ingredient(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<IngredientDto>,
) -> Result<Json<IngredientDto>, ApiError> {
    let created = state.ingredients.save(None, &request.as_draft())?;

    tracing::info!(
        id = created.ingredient.id,
        recipe_id = ?created.ingredient.recipe_id,
        "created ingredient"
    );
    Ok(Json(created.into()))
}
