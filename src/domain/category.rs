use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Menu category belonging to a store.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Category {
    pub id: i32,
    pub store_id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub store_id: i32,
    pub name: String,
}

impl NewCategory {
    pub fn new(store_id: i32, name: impl Into<String>) -> Self {
        Self {
            store_id,
            name: name.into(),
        }
    }
}

/// Patch data applied when updating an existing category.
#[derive(Debug, Clone)]
pub struct UpdateCategory {
    pub name: String,
    pub updated_at: NaiveDateTime,
}

impl UpdateCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            updated_at: chrono::Local::now().naive_utc(),
        }
    }
}

/// Query definition used to list the categories of a store.
#[derive(Debug, Clone)]
pub struct CategoryListQuery {
    pub store_id: i32,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl CategoryListQuery {
    pub fn new(store_id: i32) -> Self {
        Self {
            store_id,
            search: None,
            pagination: None,
        }
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
