use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::store::{
    NewStore as DomainNewStore, Store as DomainStore, UpdateStore as DomainUpdateStore,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::stores)]
pub struct Store {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub is_default: bool,
    pub is_active: bool,
    pub invoice_name: Option<String>,
    pub invoice_address: Option<String>,
    pub invoice_phone: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::stores)]
pub struct NewStore<'a> {
    pub name: &'a str,
    pub slug: &'a str,
    pub is_active: bool,
    pub invoice_name: Option<&'a str>,
    pub invoice_address: Option<&'a str>,
    pub invoice_phone: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::stores)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateStore<'a> {
    pub name: &'a str,
    pub slug: &'a str,
    pub is_active: bool,
    pub invoice_name: Option<&'a str>,
    pub invoice_address: Option<&'a str>,
    pub invoice_phone: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<Store> for DomainStore {
    fn from(value: Store) -> Self {
        Self {
            id: value.id,
            name: value.name,
            slug: value.slug,
            is_default: value.is_default,
            is_active: value.is_active,
            invoice_name: value.invoice_name,
            invoice_address: value.invoice_address,
            invoice_phone: value.invoice_phone,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewStore> for NewStore<'a> {
    fn from(value: &'a DomainNewStore) -> Self {
        Self {
            name: value.name.as_str(),
            slug: value.slug.as_str(),
            is_active: value.is_active,
            invoice_name: value.invoice_name.as_deref(),
            invoice_address: value.invoice_address.as_deref(),
            invoice_phone: value.invoice_phone.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateStore> for UpdateStore<'a> {
    fn from(value: &'a DomainUpdateStore) -> Self {
        Self {
            name: value.name.as_str(),
            slug: value.slug.as_str(),
            is_active: value.is_active,
            invoice_name: value.invoice_name.as_deref(),
            invoice_address: value.invoice_address.as_deref(),
            invoice_phone: value.invoice_phone.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
