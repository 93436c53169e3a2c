use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Role assigned to a local user account.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full access to every store and to user management.
    Admin,
    /// Operational access limited to explicitly granted stores.
    User,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::User
    }
}

impl From<&str> for UserRole {
    fn from(value: &str) -> Self {
        match value {
            "admin" => Self::Admin,
            _ => Self::User,
        }
    }
}

impl From<UserRole> for &'static str {
    fn from(value: UserRole) -> Self {
        match value {
            UserRole::Admin => "admin",
            UserRole::User => "user",
        }
    }
}

/// Local user account mirroring an identity held by the external provider.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    /// Stores the user holds an access grant for.
    pub store_ids: Vec<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new local user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    /// Argon2 hash of the fallback credential. Primary authentication is
    /// always the external provider.
    pub password_hash: String,
    pub name: String,
    pub role: UserRole,
}

impl NewUser {
    pub fn new(
        email: impl Into<String>,
        password_hash: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let email: String = email.into();
        Self {
            email: email.to_lowercase(),
            password_hash: password_hash.into(),
            name: name.into(),
            role: UserRole::default(),
        }
    }

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }
}

/// Patch data applied when updating an existing user.
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub name: String,
    pub role: UserRole,
    pub updated_at: NaiveDateTime,
}

impl UpdateUser {
    pub fn new(name: impl Into<String>, role: UserRole) -> Self {
        Self {
            name: name.into(),
            role,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }
}

/// Query definition used to list users.
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    /// Optional search term matched against name or email.
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl UserListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, limit: i64, offset: i64) -> Self {
        self.pagination = Some(Pagination::new(limit, offset));
        self
    }
}
