use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::store::{NewStore, UpdateStore};
use crate::forms::{normalize_optional_text, normalize_text};

const NAME_MAX_LEN: u64 = 128;
const SLUG_MAX_LEN: u64 = 64;

pub type StoreFormResult<T> = Result<T, StoreFormError>;

/// Errors that can occur while processing store payloads.
#[derive(Debug, Error)]
pub enum StoreFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("store name cannot be empty")]
    EmptyName,
    #[error("invalid slug `{0}`: use lowercase letters, digits and hyphens")]
    InvalidSlug(String),
}

/// A slug is non-empty lowercase alphanumeric with interior hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

/// JSON payload accepted when creating or updating a store.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveStoreForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    #[validate(length(min = 1, max = SLUG_MAX_LEN))]
    pub slug: String,
    /// Requesting `true` promotes the store through the default swap;
    /// `false` is rejected, a default is only replaced by promoting another
    /// store.
    #[serde(default)]
    pub is_default: Option<bool>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub invoice_name: Option<String>,
    #[serde(default)]
    pub invoice_address: Option<String>,
    #[serde(default)]
    pub invoice_phone: Option<String>,
}

fn default_true() -> bool {
    true
}

impl SaveStoreForm {
    fn normalized(self) -> StoreFormResult<NormalizedStore> {
        self.validate()?;

        let name = normalize_text(&self.name);
        if name.is_empty() {
            return Err(StoreFormError::EmptyName);
        }

        let slug = self.slug.trim().to_string();
        if !is_valid_slug(&slug) {
            return Err(StoreFormError::InvalidSlug(slug));
        }

        Ok(NormalizedStore {
            name,
            slug,
            is_default: self.is_default,
            is_active: self.is_active,
            invoice_name: normalize_optional_text(self.invoice_name),
            invoice_address: normalize_optional_text(self.invoice_address),
            invoice_phone: normalize_optional_text(self.invoice_phone),
        })
    }

    /// Validates and sanitizes the payload into a domain `NewStore` plus the
    /// requested default flag.
    pub fn into_new_store(self) -> StoreFormResult<(NewStore, Option<bool>)> {
        let normalized = self.normalized()?;

        let mut new_store = NewStore::new(normalized.name, normalized.slug);
        if !normalized.is_active {
            new_store = new_store.inactive();
        }
        if let Some(value) = normalized.invoice_name {
            new_store = new_store.with_invoice_name(value);
        }
        if let Some(value) = normalized.invoice_address {
            new_store = new_store.with_invoice_address(value);
        }
        if let Some(value) = normalized.invoice_phone {
            new_store = new_store.with_invoice_phone(value);
        }

        Ok((new_store, normalized.is_default))
    }

    /// Validates and sanitizes the payload into a domain `UpdateStore` plus
    /// the requested default flag.
    pub fn into_update_store(self) -> StoreFormResult<(UpdateStore, Option<bool>)> {
        let normalized = self.normalized()?;

        let update = UpdateStore::new(normalized.name, normalized.slug, normalized.is_active)
            .invoice_details(
                normalized.invoice_name,
                normalized.invoice_address,
                normalized.invoice_phone,
            );

        Ok((update, normalized.is_default))
    }
}

struct NormalizedStore {
    name: String,
    slug: String,
    is_default: Option<bool>,
    is_active: bool,
    invoice_name: Option<String>,
    invoice_address: Option<String>,
    invoice_phone: Option<String>,
}

/// JSON payload accepted by the store-selection endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct SelectStoreForm {
    #[validate(range(min = 1))]
    pub store_id: i32,
}
