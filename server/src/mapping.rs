//! Conversions between persistence types and transfer objects.

use crate::dto::{IngredientDto, RecipeDto};
use crate::models::{Ingredient, IngredientDetail, IngredientDraft, Recipe, RecipeForm};

impl From<Recipe> for RecipeDto {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: Some(recipe.id),
            name: recipe.name,
            description: recipe.description,
        }
    }
}

impl From<IngredientDetail> for IngredientDto {
    fn from(detail: IngredientDetail) -> Self {
        Self {
            id: Some(detail.ingredient.id),
            name: detail.ingredient.name,
            recipe: detail.recipe.map(RecipeDto::from),
        }
    }
}

impl RecipeDto {
    pub fn as_form(&self) -> RecipeForm<'_> {
        RecipeForm {
            name: &self.name,
            description: &self.description,
        }
    }
}

impl IngredientDto {
    /// Only the nested recipe's id matters; a nested object without an id
    /// counts as no association.
    pub fn as_draft(&self) -> IngredientDraft<'_> {
        IngredientDraft {
            name: &self.name,
            recipe_id: self.recipe.as_ref().and_then(|recipe| recipe.id),
        }
    }
}

/// Renders ingredients that are already known to belong to `recipe`.
pub fn ingredients_of(recipe: &Recipe, ingredients: Vec<Ingredient>) -> Vec<IngredientDto> {
    ingredients
        .into_iter()
        .map(|ingredient| {
            IngredientDto::from(IngredientDetail {
                ingredient,
                recipe: Some(recipe.clone()),
            })
        })
        .collect()
}
