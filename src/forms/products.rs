use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{NewProduct, UpdateProduct};
use crate::forms::{normalize_optional_text, normalize_text};

const NAME_MAX_LEN: u64 = 128;

pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product payloads.
#[derive(Debug, Error)]
pub enum ProductFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("product name cannot be empty")]
    EmptyName,
}

/// JSON payload accepted when creating or updating a product.
#[derive(Debug, Deserialize, Validate)]
pub struct ProductForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    #[serde(default)]
    #[validate(url)]
    pub image_url: Option<String>,
}

impl ProductForm {
    fn normalized(self) -> ProductFormResult<(String, Option<String>)> {
        self.validate()?;

        let name = normalize_text(&self.name);
        if name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        Ok((name, normalize_optional_text(self.image_url)))
    }

    pub fn into_new_product(self, store_id: i32) -> ProductFormResult<NewProduct> {
        let (name, image_url) = self.normalized()?;

        let mut new_product = NewProduct::new(store_id, name);
        if let Some(image_url) = image_url {
            new_product = new_product.with_image_url(image_url);
        }

        Ok(new_product)
    }

    pub fn into_update_product(self) -> ProductFormResult<UpdateProduct> {
        let (name, image_url) = self.normalized()?;
        Ok(UpdateProduct::new(name, image_url))
    }
}

/// JSON payload accepted by the product copy endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct CopyProductsForm {
    #[validate(length(min = 1))]
    pub product_ids: Vec<i32>,
    #[validate(range(min = 1))]
    pub target_store_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_form_converts_to_new_product() {
        let form = ProductForm {
            name: " Iced  Latte ".to_string(),
            image_url: Some("https://cdn.example.com/latte.png".to_string()),
        };

        let product = form.into_new_product(7).expect("valid form");

        assert_eq!(product.store_id, 7);
        assert_eq!(product.name, "Iced Latte");
        assert_eq!(
            product.image_url.as_deref(),
            Some("https://cdn.example.com/latte.png")
        );
    }

    #[test]
    fn product_form_rejects_invalid_url() {
        let form = ProductForm {
            name: "Latte".to_string(),
            image_url: Some("not a url".to_string()),
        };

        let result = form.into_new_product(1);

        assert!(matches!(result, Err(ProductFormError::Validation(_))));
    }
}
