use diesel::prelude::*;

use crate::schema::{ingredient, recipe};

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = recipe)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Recipe {
    pub id: i32,
    pub name: String,
    pub description: String,
}

/// Column values written on insert and on overwrite.
#[derive(Insertable, AsChangeset, Debug, Clone, Copy)]
#[diesel(table_name = recipe)]
pub struct RecipeForm<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = ingredient)]
#[diesel(belongs_to(Recipe))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub recipe_id: Option<i32>,
}

/// `recipe_id: None` must write NULL on both insert and update, so the
/// diesel defaults (DEFAULT on insert, skip on update) are turned off.
#[derive(Insertable, AsChangeset, Debug, Clone, Copy)]
#[diesel(table_name = ingredient)]
#[diesel(treat_none_as_default_value = false)]
#[diesel(treat_none_as_null = true)]
pub struct IngredientForm<'a> {
    pub name: &'a str,
    pub recipe_id: Option<i32>,
}

/// An ingredient together with the recipe it is associated to, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientDetail {
    pub ingredient: Ingredient,
    pub recipe: Option<Recipe>,
}

/// Incoming ingredient values before the recipe reference is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientDraft<'a> {
    pub name: &'a str,
    pub recipe_id: Option<i32>,
}
