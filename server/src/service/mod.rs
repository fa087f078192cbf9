//! Stateless façades over the repositories.
//!
//! Each public method checks out one pooled connection and runs exactly one
//! transaction through [`crate::db::in_transaction`].

mod ingredients;
mod recipes;

pub use ingredients::IngredientService;
pub use recipes::RecipeService;
