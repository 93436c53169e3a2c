use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Sellable menu entry belonging to a store.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Item {
    pub id: i32,
    pub store_id: i32,
    pub category_id: Option<i32>,
    /// Optional link to a product template. The image reference is copied
    /// from the product at creation time and not kept in sync afterwards.
    pub product_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i32,
    /// Remaining stock, never negative.
    pub stock: i32,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new item.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub store_id: i32,
    pub category_id: Option<i32>,
    pub product_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i32,
    pub stock: i32,
    pub image_url: Option<String>,
}

impl NewItem {
    pub fn new(store_id: i32, name: impl Into<String>, price_cents: i32) -> Self {
        Self {
            store_id,
            category_id: None,
            product_id: None,
            name: name.into(),
            description: None,
            price_cents,
            stock: 0,
            image_url: None,
        }
    }

    pub fn with_category_id(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_product_id(mut self, product_id: i32) -> Self {
        self.product_id = Some(product_id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_stock(mut self, stock: i32) -> Self {
        self.stock = stock.max(0);
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// Full-replacement patch applied when updating an existing item.
#[derive(Debug, Clone)]
pub struct UpdateItem {
    pub category_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i32,
    pub stock: i32,
    pub image_url: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl UpdateItem {
    pub fn new(name: impl Into<String>, price_cents: i32, stock: i32) -> Self {
        Self {
            category_id: None,
            name: name.into(),
            description: None,
            price_cents,
            stock: stock.max(0),
            image_url: None,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }

    pub fn category_id(mut self, category_id: Option<i32>) -> Self {
        self.category_id = category_id;
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url;
        self
    }
}

/// Query definition used to list the items of a store.
#[derive(Debug, Clone)]
pub struct ItemListQuery {
    pub store_id: i32,
    /// Optional category filter.
    pub category_id: Option<i32>,
    /// Optional search term matched against name or description.
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl ItemListQuery {
    pub fn new(store_id: i32) -> Self {
        Self {
            store_id,
            category_id: None,
            search: None,
            pagination: None,
        }
    }

    pub fn category_id(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
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
