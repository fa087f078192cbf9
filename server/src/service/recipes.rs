use crate::db::{in_transaction, DbPool, StoreError};
use crate::models::{Ingredient, Recipe, RecipeForm};
use crate::repository::{ingredients, recipes};

#[derive(Clone)]
pub struct RecipeService {
    pool: DbPool,
}

impl RecipeService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn find_all(&self) -> Result<Vec<Recipe>, StoreError> {
        in_transaction(&self.pool, |conn| Ok(recipes::find_all(conn)?))
    }

    pub fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, StoreError> {
        in_transaction(&self.pool, |conn| Ok(recipes::find_by_id(conn, id)?))
    }

    /// Insert when `id` is `None`, overwrite (or insert under `id`) otherwise.
    pub fn save(&self, id: Option<i32>, form: &RecipeForm<'_>) -> Result<Recipe, StoreError> {
        in_transaction(&self.pool, |conn| Ok(recipes::save(conn, id, form)?))
    }

    /// Overwrites an existing recipe. Returns `None` without writing anything
    /// when no recipe has `id`.
    pub fn update(&self, id: i32, form: &RecipeForm<'_>) -> Result<Option<Recipe>, StoreError> {
        in_transaction(&self.pool, |conn| {
            if recipes::find_by_id(conn, id)?.is_none() {
                return Ok(None);
            }
            Ok(Some(recipes::save(conn, Some(id), form)?))
        })
    }

    /// Returns `false` when there was nothing to delete.
    pub fn delete(&self, id: i32) -> Result<bool, StoreError> {
        in_transaction(&self.pool, |conn| Ok(recipes::delete_by_id(conn, id)? > 0))
    }

    /// The recipe and its associated ingredients, or `None` if the recipe
    /// does not exist.
    pub fn ingredients(&self, id: i32) -> Result<Option<(Recipe, Vec<Ingredient>)>, StoreError> {
        in_transaction(&self.pool, |conn| {
            let Some(recipe) = recipes::find_by_id(conn, id)? else {
                return Ok(None);
            };
            let ingredients = ingredients::find_by_recipe(conn, &recipe)?;
            Ok(Some((recipe, ingredients)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::test_db;

    const SOUP: RecipeForm<'static> = RecipeForm {
        name: "Soup",
        description: "Hot",
    };

    #[test]
    fn test_create_then_get() {
        let db = test_db();
        let service = RecipeService::new(db.pool.clone());

        let created = service.save(None, &SOUP).unwrap();
        let fetched = service.find_by_id(created.id).unwrap();

        assert_eq!(fetched, Some(created));
    }

    #[test]
    fn test_update_missing_creates_nothing() {
        let db = test_db();
        let service = RecipeService::new(db.pool.clone());

        assert_eq!(service.update(99, &SOUP).unwrap(), None);
        assert!(service.find_all().unwrap().is_empty());
    }

    #[test]
    fn test_update_existing() {
        let db = test_db();
        let service = RecipeService::new(db.pool.clone());
        let created = service.save(None, &SOUP).unwrap();

        let updated = service
            .update(
                created.id,
                &RecipeForm {
                    name: "Broth",
                    description: "Clear",
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Broth");
        assert_eq!(service.find_all().unwrap(), vec![updated]);
    }

    #[test]
    fn test_duplicate_name_is_constraint_violation() {
        let db = test_db();
        let service = RecipeService::new(db.pool.clone());
        service.save(None, &SOUP).unwrap();

        let duplicate = service.save(None, &SOUP);

        assert!(matches!(duplicate, Err(StoreError::ConstraintViolation(_))));
        assert_eq!(service.find_all().unwrap().len(), 1);
    }

    #[test]
    fn test_delete() {
        let db = test_db();
        let service = RecipeService::new(db.pool.clone());
        let created = service.save(None, &SOUP).unwrap();

        assert!(service.delete(created.id).unwrap());
        assert!(!service.delete(created.id).unwrap());
        assert_eq!(service.find_by_id(created.id).unwrap(), None);
    }

    #[test]
    fn test_ingredients_of_missing_recipe() {
        let db = test_db();
        let service = RecipeService::new(db.pool.clone());

        assert_eq!(service.ingredients(1).unwrap(), None);
    }
}
