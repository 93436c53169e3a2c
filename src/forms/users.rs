use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::user::{UpdateUser, UserRole};
use crate::forms::normalize_text;

const NAME_MAX_LEN: u64 = 128;
const PASSWORD_MIN_LEN: u64 = 8;

pub type UserFormResult<T> = Result<T, UserFormError>;

/// Errors that can occur while processing user payloads.
#[derive(Debug, Error)]
pub enum UserFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("user name cannot be empty")]
    EmptyName,
}

/// JSON payload accepted when an admin creates a user.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = PASSWORD_MIN_LEN))]
    pub password: String,
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    #[serde(default)]
    pub role: UserRole,
    /// Stores the user is granted access to. Ignored for admins, who do not
    /// need grants.
    #[serde(default)]
    pub store_ids: Vec<i32>,
}

impl CreateUserForm {
    pub fn normalized_name(&self) -> UserFormResult<String> {
        self.validate()?;

        let name = normalize_text(&self.name);
        if name.is_empty() {
            return Err(UserFormError::EmptyName);
        }
        Ok(name)
    }
}

/// JSON payload accepted when an admin updates a user.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    pub role: UserRole,
    /// Replaces the user's store-access list wholesale.
    #[serde(default)]
    pub store_ids: Vec<i32>,
}

impl UpdateUserForm {
    pub fn into_update_user(self) -> UserFormResult<(UpdateUser, Vec<i32>)> {
        self.validate()?;

        let name = normalize_text(&self.name);
        if name.is_empty() {
            return Err(UserFormError::EmptyName);
        }

        Ok((UpdateUser::new(name, self.role), self.store_ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_form_requires_long_password() {
        let form = CreateUserForm {
            email: "chef@example.com".to_string(),
            password: "short".to_string(),
            name: "Chef".to_string(),
            role: UserRole::User,
            store_ids: Vec::new(),
        };

        assert!(matches!(
            form.normalized_name(),
            Err(UserFormError::Validation(_))
        ));
    }

    #[test]
    fn update_user_form_converts_to_patch() {
        let form = UpdateUserForm {
            name: "  Head   Chef ".to_string(),
            role: UserRole::Admin,
            store_ids: vec![1, 3],
        };

        let (update, store_ids) = form.into_update_user().expect("valid form");

        assert_eq!(update.name, "Head Chef");
        assert_eq!(update.role, UserRole::Admin);
        assert_eq!(store_ids, vec![1, 3]);
    }
}
