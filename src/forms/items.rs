use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::item::{NewItem, UpdateItem};
use crate::forms::{normalize_optional_text, normalize_text};

const NAME_MAX_LEN: u64 = 128;
const DESCRIPTION_MAX_LEN: u64 = 2048;

pub type ItemFormResult<T> = Result<T, ItemFormError>;

/// Errors that can occur while processing item payloads.
#[derive(Debug, Error)]
pub enum ItemFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("item name cannot be empty")]
    EmptyName,
}

/// JSON payload accepted when creating or updating an item.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveItemForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = DESCRIPTION_MAX_LEN))]
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub price_cents: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock: i32,
    #[serde(default)]
    pub category_id: Option<i32>,
    /// Optional product template link, honored at creation only.
    #[serde(default)]
    pub product_id: Option<i32>,
    #[serde(default)]
    #[validate(url)]
    pub image_url: Option<String>,
}

impl SaveItemForm {
    fn normalized_name(&self) -> ItemFormResult<String> {
        self.validate()?;

        let name = normalize_text(&self.name);
        if name.is_empty() {
            return Err(ItemFormError::EmptyName);
        }
        Ok(name)
    }

    pub fn into_new_item(self, store_id: i32) -> ItemFormResult<NewItem> {
        let name = self.normalized_name()?;

        let mut new_item = NewItem::new(store_id, name, self.price_cents).with_stock(self.stock);
        if let Some(category_id) = self.category_id {
            new_item = new_item.with_category_id(category_id);
        }
        if let Some(product_id) = self.product_id {
            new_item = new_item.with_product_id(product_id);
        }
        if let Some(description) = normalize_optional_text(self.description) {
            new_item = new_item.with_description(description);
        }
        if let Some(image_url) = normalize_optional_text(self.image_url) {
            new_item = new_item.with_image_url(image_url);
        }

        Ok(new_item)
    }

    pub fn into_update_item(self) -> ItemFormResult<UpdateItem> {
        let name = self.normalized_name()?;

        Ok(UpdateItem::new(name, self.price_cents, self.stock)
            .category_id(self.category_id)
            .description(normalize_optional_text(self.description))
            .image_url(normalize_optional_text(self.image_url)))
    }
}

/// JSON payload accepted by the stock decrement endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct DecrementStockForm {
    #[validate(range(min = 1))]
    pub quantity: i32,
}
