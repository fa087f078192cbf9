use std::collections::HashMap;

use diesel::SqliteConnection;

use crate::db::{in_transaction, DbPool, StoreError};
use crate::models::{Ingredient, IngredientDetail, IngredientDraft, IngredientForm, Recipe};
use crate::repository::{ingredients, recipes};

#[derive(Clone)]
pub struct IngredientService {
    pool: DbPool,
}

impl IngredientService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn find_all(&self) -> Result<Vec<IngredientDetail>, StoreError> {
        in_transaction(&self.pool, |conn| {
            let all = ingredients::find_all(conn)?;
            let by_id: HashMap<i32, Recipe> = recipes::find_all(conn)?
                .into_iter()
                .map(|recipe| (recipe.id, recipe))
                .collect();

            Ok(all
                .into_iter()
                .map(|ingredient| {
                    let recipe = ingredient
                        .recipe_id
                        .and_then(|id| by_id.get(&id).cloned());
                    IngredientDetail { ingredient, recipe }
                })
                .collect())
        })
    }

    pub fn find_by_id(&self, id: i32) -> Result<Option<IngredientDetail>, StoreError> {
        in_transaction(&self.pool, |conn| {
            let Some(ingredient) = ingredients::find_by_id(conn, id)? else {
                return Ok(None);
            };
            Ok(Some(attach_recipe(conn, ingredient)?))
        })
    }

    /// Insert when `id` is `None`, overwrite (or insert under `id`) otherwise.
    ///
    /// A referenced recipe is looked up in the same transaction; if it does
    /// not exist nothing is written and [`StoreError::MissingReference`] is
    /// returned.
    pub fn save(
        &self,
        id: Option<i32>,
        draft: &IngredientDraft<'_>,
    ) -> Result<IngredientDetail, StoreError> {
        in_transaction(&self.pool, |conn| save_resolved(conn, id, draft))
    }

    /// Overwrites an existing ingredient. Returns `None` without writing
    /// anything when no ingredient has `id`.
    pub fn update(
        &self,
        id: i32,
        draft: &IngredientDraft<'_>,
    ) -> Result<Option<IngredientDetail>, StoreError> {
        in_transaction(&self.pool, |conn| {
            if ingredients::find_by_id(conn, id)?.is_none() {
                return Ok(None);
            }
            Ok(Some(save_resolved(conn, Some(id), draft)?))
        })
    }

    /// Returns `false` when there was nothing to delete.
    pub fn delete(&self, id: i32) -> Result<bool, StoreError> {
        in_transaction(&self.pool, |conn| Ok(ingredients::delete_by_id(conn, id)? > 0))
    }
}

fn resolve_recipe(
    conn: &mut SqliteConnection,
    recipe_id: Option<i32>,
) -> Result<Option<Recipe>, StoreError> {
    let Some(recipe_id) = recipe_id else {
        return Ok(None);
    };
    match recipes::find_by_id(conn, recipe_id)? {
        Some(recipe) => Ok(Some(recipe)),
        None => Err(StoreError::MissingReference {
            table: "recipe",
            id: recipe_id,
        }),
    }
}

fn save_resolved(
    conn: &mut SqliteConnection,
    id: Option<i32>,
    draft: &IngredientDraft<'_>,
) -> Result<IngredientDetail, StoreError> {
    let recipe = resolve_recipe(conn, draft.recipe_id)?;
    let form = IngredientForm {
        name: draft.name,
        recipe_id: recipe.as_ref().map(|r| r.id),
    };
    let ingredient = ingredients::save(conn, id, &form)?;
    Ok(IngredientDetail { ingredient, recipe })
}

fn attach_recipe(
    conn: &mut SqliteConnection,
    ingredient: Ingredient,
) -> Result<IngredientDetail, StoreError> {
    let recipe = match ingredient.recipe_id {
        Some(recipe_id) => recipes::find_by_id(conn, recipe_id)?,
        None => None,
    };
    Ok(IngredientDetail { ingredient, recipe })
}
