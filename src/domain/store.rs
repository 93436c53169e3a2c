use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// A tenant: an independently configured restaurant sharing this deployment.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Store {
    pub id: i32,
    pub name: String,
    /// URL-safe identifier, unique across the deployment.
    pub slug: String,
    /// Marks the store shown to public visitors absent an explicit selection.
    pub is_default: bool,
    pub is_active: bool,
    /// Optional display fields printed on invoices.
    pub invoice_name: Option<String>,
    pub invoice_address: Option<String>,
    pub invoice_phone: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new store.
#[derive(Debug, Clone)]
pub struct NewStore {
    pub name: String,
    pub slug: String,
    pub is_active: bool,
    pub invoice_name: Option<String>,
    pub invoice_address: Option<String>,
    pub invoice_phone: Option<String>,
}

impl NewStore {
    /// Build a store payload. Stores are never inserted as the default;
    /// promotion goes through the dedicated default swap.
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            is_active: true,
            invoice_name: None,
            invoice_address: None,
            invoice_phone: None,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn with_invoice_name(mut self, value: impl Into<String>) -> Self {
        self.invoice_name = Some(value.into());
        self
    }

    pub fn with_invoice_address(mut self, value: impl Into<String>) -> Self {
        self.invoice_address = Some(value.into());
        self
    }

    pub fn with_invoice_phone(mut self, value: impl Into<String>) -> Self {
        self.invoice_phone = Some(value.into());
        self
    }
}

/// Full-replacement patch applied when updating a store. The default flag is
/// excluded; it changes only through the transactional swap.
#[derive(Debug, Clone)]
pub struct UpdateStore {
    pub name: String,
    pub slug: String,
    pub is_active: bool,
    pub invoice_name: Option<String>,
    pub invoice_address: Option<String>,
    pub invoice_phone: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl UpdateStore {
    pub fn new(name: impl Into<String>, slug: impl Into<String>, is_active: bool) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            is_active,
            invoice_name: None,
            invoice_address: None,
            invoice_phone: None,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }

    pub fn invoice_details(
        mut self,
        name: Option<String>,
        address: Option<String>,
        phone: Option<String>,
    ) -> Self {
        self.invoice_name = name;
        self.invoice_address = address;
        self.invoice_phone = phone;
        self
    }
}

/// Query definition used to list stores.
#[derive(Debug, Clone, Default)]
pub struct StoreListQuery {
    /// Restrict the results to active stores.
    pub active_only: bool,
    /// Optional search term matched against name or slug.
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl StoreListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_only(mut self) -> Self {
        self.active_only = true;
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
