use crate::models::{Recipe, RecipeForm};
use crate::schema::{ingredient, recipe};
use diesel::prelude::*;

pub fn find_all(conn: &mut SqliteConnection) -> QueryResult<Vec<Recipe>> {
    let _span = tracing::info_span!("db.query", table = "recipe", op = "find_all").entered();

    recipe::table
        .order(recipe::id.asc())
        .select(Recipe::as_select())
        .load(conn)
}

pub fn find_by_id(conn: &mut SqliteConnection, id: i32) -> QueryResult<Option<Recipe>> {
    let _span = tracing::info_span!("db.query", table = "recipe", op = "find_by_id").entered();

    recipe::table
        .find(id)
        .select(Recipe::as_select())
        .first(conn)
        .optional()
}

/// Inserts a new row when `id` is `None`; otherwise overwrites the row with
/// that id, inserting it under that id if it does not exist.
pub fn save(
    conn: &mut SqliteConnection,
    id: Option<i32>,
    form: &RecipeForm<'_>,
) -> QueryResult<Recipe> {
    let _span = tracing::info_span!("db.query", table = "recipe", op = "save").entered();

    let Some(id) = id else {
        return diesel::insert_into(recipe::table)
            .values(form)
            .returning(Recipe::as_returning())
            .get_result(conn);
    };

    let updated = diesel::update(recipe::table.find(id))
        .set(form)
        .returning(Recipe::as_returning())
        .get_result(conn)
        .optional()?;

    match updated {
        Some(recipe) => Ok(recipe),
        None => diesel::insert_into(recipe::table)
            .values((
                recipe::id.eq(id),
                recipe::name.eq(form.name),
                recipe::description.eq(form.description),
            ))
            .returning(Recipe::as_returning())
            .get_result(conn),
    }
}

/// Deletes the recipe and clears the reference on every ingredient that
/// pointed to it. Returns the number of recipe rows removed.
pub fn delete_by_id(conn: &mut SqliteConnection, id: i32) -> QueryResult<usize> {
    let _span = tracing::info_span!("db.query", table = "recipe", op = "delete_by_id").entered();

    let orphaned = diesel::update(ingredient::table.filter(ingredient::recipe_id.eq(id)))
        .set(ingredient::recipe_id.eq(None::<i32>))
        .execute(conn)?;
    if orphaned > 0 {
        tracing::debug!(recipe_id = id, orphaned, "cleared recipe reference on ingredients");
    }

    diesel::delete(recipe::table.find(id)).execute(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::test_db;
    use crate::models::IngredientForm;
    use crate::repository::ingredients;

    fn form<'a>(name: &'a str, description: &'a str) -> RecipeForm<'a> {
        RecipeForm { name, description }
    }

    #[test]
    fn test_save_without_id_assigns_one() {
        let db = test_db();
        let mut conn = db.pool.get().unwrap();

        let first = save(&mut conn, None, &form("REC1", "Desc")).unwrap();
        let second = save(&mut conn, None, &form("REC2", "Desc2")).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.name, "REC1");
        assert_eq!(first.description, "Desc");
    }

    #[test]
    fn test_save_with_existing_id_overwrites() {
        let db = test_db();
        let mut conn = db.pool.get().unwrap();
        let created = save(&mut conn, None, &form("Soup", "Hot")).unwrap();

        let updated = save(&mut conn, Some(created.id), &form("Gazpacho", "Cold")).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(find_all(&mut conn).unwrap(), vec![updated]);
    }

    #[test]
    fn test_save_with_unknown_id_inserts_under_that_id() {
        let db = test_db();
        let mut conn = db.pool.get().unwrap();

        let saved = save(&mut conn, Some(42), &form("Pie", "Sweet")).unwrap();

        assert_eq!(saved.id, 42);
        assert_eq!(find_by_id(&mut conn, 42).unwrap(), Some(saved));
    }

    #[test]
    fn test_find_by_id_missing() {
        let db = test_db();
        let mut conn = db.pool.get().unwrap();

        assert_eq!(find_by_id(&mut conn, 1).unwrap(), None);
    }

    #[test]
    fn test_delete_orphans_ingredients() {
        let db = test_db();
        let mut conn = db.pool.get().unwrap();
        let soup = save(&mut conn, None, &form("Soup", "Hot")).unwrap();
        let salt = ingredients::save(
            &mut conn,
            None,
            &IngredientForm {
                name: "Salt",
                recipe_id: Some(soup.id),
            },
        )
        .unwrap();

        assert_eq!(delete_by_id(&mut conn, soup.id).unwrap(), 1);

        let salt = ingredients::find_by_id(&mut conn, salt.id).unwrap().unwrap();
        assert_eq!(salt.recipe_id, None);
        assert_eq!(find_by_id(&mut conn, soup.id).unwrap(), None);
    }

    #[test]
    fn test_delete_missing_removes_nothing() {
        let db = test_db();
        let mut conn = db.pool.get().unwrap();
        save(&mut conn, None, &form("Soup", "Hot")).unwrap();

        assert_eq!(delete_by_id(&mut conn, 99).unwrap(), 0);
        assert_eq!(find_all(&mut conn).unwrap().len(), 1);
    }
}
