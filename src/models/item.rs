use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::item::{
    Item as DomainItem, NewItem as DomainNewItem, UpdateItem as DomainUpdateItem,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::items)]
pub struct Item {
    pub id: i32,
    pub store_id: i32,
    pub category_id: Option<i32>,
    pub product_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i32,
    pub stock: i32,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::items)]
pub struct NewItem<'a> {
    pub store_id: i32,
    pub category_id: Option<i32>,
    pub product_id: Option<i32>,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price_cents: i32,
    pub stock: i32,
    pub image_url: Option<&'a str>,
}

// product_id is intentionally absent: the template link is fixed at creation.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::items)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateItem<'a> {
    pub category_id: Option<i32>,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price_cents: i32,
    pub stock: i32,
    pub image_url: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<Item> for DomainItem {
    fn from(value: Item) -> Self {
        Self {
            id: value.id,
            store_id: value.store_id,
            category_id: value.category_id,
            product_id: value.product_id,
            name: value.name,
            description: value.description,
            price_cents: value.price_cents,
            stock: value.stock,
            image_url: value.image_url,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewItem> for NewItem<'a> {
    fn from(value: &'a DomainNewItem) -> Self {
        Self {
            store_id: value.store_id,
            category_id: value.category_id,
            product_id: value.product_id,
            name: value.name.as_str(),
            description: value.description.as_deref(),
            price_cents: value.price_cents,
            stock: value.stock,
            image_url: value.image_url.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateItem> for UpdateItem<'a> {
    fn from(value: &'a DomainUpdateItem) -> Self {
        Self {
            category_id: value.category_id,
            name: value.name.as_str(),
            description: value.description.as_deref(),
            price_cents: value.price_cents,
            stock: value.stock,
            image_url: value.image_url.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
