//! JSON shapes exchanged with clients.
//!
//! Missing strings deserialize as empty so that an absent `name` is reported
//! as a validation violation rather than a malformed body.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
pub struct RecipeDto {
    /// Assigned by the server; ignored on create and forced to the path id on update
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    #[validate(
        length(min = 1, max = 40, message = "must be between 1 and 40 characters"),
        custom(function = "not_blank")
    )]
    #[schema(min_length = 1, max_length = 40)]
    pub name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, max = 40, message = "must be between 1 and 40 characters"),
        custom(function = "not_blank")
    )]
    #[schema(min_length = 1, max_length = 40)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
pub struct IngredientDto {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    #[validate(
        length(min = 1, max = 40, message = "must be between 1 and 40 characters"),
        custom(function = "not_blank")
    )]
    #[schema(min_length = 1, max_length = 40)]
    pub name: String,
    /// Owning recipe. Only `recipe.id` is read on write; `null` clears the association.
    #[serde(default)]
    pub recipe: Option<RecipeDto>,
}

/// One failed constraint on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    pub field: String,
    pub code: String,
    pub message: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}

/// Flattens validator output into a stable, sorted list of field violations.
pub fn violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut out: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldViolation {
                field: field.to_string(),
                code: error.code.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("failed {} check", error.code)),
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
    out
}
