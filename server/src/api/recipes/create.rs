use crate::api::{ApiError, ErrorResponse, ValidatedJson, ValidationErrorResponse};
use crate::dto::RecipeDto;
use crate::AppState;
use axum::{extract::State, Json};

#[utoipa::path(
    post,
    path = "/recipes",
    tag = "recipes",
    request_body = RecipeDto,
    responses(
        (status = 200, description = "Recipe created", body = RecipeDto),
        (status = 400, description = "Invalid request", body = ValidationErrorResponse),
        (status = 500, description = "Store failure, including a duplicate name", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RecipeDto>,
) -> Result<Json<RecipeDto>, ApiError> {
    // Any client-supplied id is ignored; the store assigns one
    let created = state.recipes.save(None, &request.as_form())?;

    tracing::info!(id = created.id, "created recipe");
    Ok(Json(created.into()))
}
