use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{NewCategory, UpdateCategory};
use crate::forms::normalize_text;

/// Maximum length allowed for a category name.
const NAME_MAX_LEN: u64 = 128;

pub type CategoryFormResult<T> = Result<T, CategoryFormError>;

/// Errors that can occur while processing category payloads.
#[derive(Debug, Error)]
pub enum CategoryFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("category name cannot be empty")]
    EmptyName,
}

/// JSON payload accepted when creating or updating a category.
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
}

impl CategoryForm {
    fn normalized_name(&self) -> CategoryFormResult<String> {
        self.validate()?;

        let name = normalize_text(&self.name);
        if name.is_empty() {
            return Err(CategoryFormError::EmptyName);
        }
        Ok(name)
    }

    /// Validates and sanitizes the payload into a domain `NewCategory`.
    pub fn into_new_category(self, store_id: i32) -> CategoryFormResult<NewCategory> {
        let name = self.normalized_name()?;
        Ok(NewCategory::new(store_id, name))
    }

    /// Validates and sanitizes the payload into a domain `UpdateCategory`.
    pub fn into_update_category(self) -> CategoryFormResult<UpdateCategory> {
        let name = self.normalized_name()?;
        Ok(UpdateCategory::new(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_form_sanitizes_name() {
        let form = CategoryForm {
            name: "  Hot   Drinks ".to_string(),
        };

        let new_category = form.into_new_category(3).expect("conversion succeeds");

        assert_eq!(new_category.store_id, 3);
        assert_eq!(new_category.name, "Hot Drinks");
    }

    #[test]
    fn category_form_rejects_blank_name() {
        let form = CategoryForm {
            name: "   ".to_string(),
        };

        let result = form.into_new_category(1);

        assert!(matches!(result, Err(CategoryFormError::EmptyName)));
    }
}
