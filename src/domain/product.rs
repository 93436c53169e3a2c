use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Shared name/image template that store items can link to.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    pub id: i32,
    pub store_id: i32,
    pub name: String,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub store_id: i32,
    pub name: String,
    pub image_url: Option<String>,
}

impl NewProduct {
    pub fn new(store_id: i32, name: impl Into<String>) -> Self {
        Self {
            store_id,
            name: name.into(),
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// Patch data applied when updating an existing product.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    pub name: String,
    pub image_url: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl UpdateProduct {
    pub fn new(name: impl Into<String>, image_url: Option<String>) -> Self {
        Self {
            name: name.into(),
            image_url,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }
}

/// Query definition used to list the products of a store.
#[derive(Debug, Clone)]
pub struct ProductListQuery {
    pub store_id: i32,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
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
