pub mod create;
pub mod delete;
pub mod get;
pub mod ingredients;
pub mod list;
pub mod update;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /recipes endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list::list_recipes).post(create::create_recipe))
        .route(
            "/recipes/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
        .route(
            "/recipes/{id}/ingredients",
            get(ingredients::list_recipe_ingredients),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        get::get_recipe,
        create::create_recipe,
        update::update_recipe,
        delete::delete_recipe,
        ingredients::list_recipe_ingredients,
    ),
    components(schemas(crate::dto::RecipeDto))
)]
pub struct ApiDoc;
