use crate::models::{Ingredient, IngredientForm, Recipe};
use crate::schema::ingredient;
use diesel::prelude::*;

pub fn find_all(conn: &mut SqliteConnection) -> QueryResult<Vec<Ingredient>> {
    let _span = tracing::info_span!("db.query", table = "ingredient", op = "find_all").entered();

    ingredient::table
        .order(ingredient::id.asc())
        .select(Ingredient::as_select())
        .load(conn)
}

pub fn find_by_id(conn: &mut SqliteConnection, id: i32) -> QueryResult<Option<Ingredient>> {
    let _span =
        tracing::info_span!("db.query", table = "ingredient", op = "find_by_id").entered();

    ingredient::table
        .find(id)
        .select(Ingredient::as_select())
        .first(conn)
        .optional()
}

pub fn find_by_recipe(conn: &mut SqliteConnection, recipe: &Recipe) -> QueryResult<Vec<Ingredient>> {
    let _span =
        tracing::info_span!("db.query", table = "ingredient", op = "find_by_recipe").entered();

    Ingredient::belonging_to(recipe)
        .order(ingredient::id.asc())
        .select(Ingredient::as_select())
        .load(conn)
}

/// Same contract as [`crate::repository::recipes::save`].
pub fn save(
    conn: &mut SqliteConnection,
    id: Option<i32>,
    form: &IngredientForm<'_>,
) -> QueryResult<Ingredient> {
    let _span = tracing::info_span!("db.query", table = "ingredient", op = "save").entered();

    let Some(id) = id else {
        return diesel::insert_into(ingredient::table)
            .values(form)
            .returning(Ingredient::as_returning())
            .get_result(conn);
    };

    let updated = diesel::update(ingredient::table.find(id))
        .set(form)
        .returning(Ingredient::as_returning())
        .get_result(conn)
        .optional()?;

    match updated {
        Some(ingredient) => Ok(ingredient),
        None => diesel::insert_into(ingredient::table)
            .values((
                ingredient::id.eq(id),
                ingredient::name.eq(form.name),
                ingredient::recipe_id.eq(form.recipe_id),
            ))
            .returning(Ingredient::as_returning())
            .get_result(conn),
    }
}

pub fn delete_by_id(conn: &mut SqliteConnection, id: i32) -> QueryResult<usize> {
    let _span =
        tracing::info_span!("db.query", table = "ingredient", op = "delete_by_id").entered();

    diesel::delete(ingredient::table.find(id)).execute(conn)
}
