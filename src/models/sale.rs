use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::sale::{Sale as DomainSale, SaleItem as DomainSaleItem};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::sales)]
pub struct Sale {
    pub id: i32,
    pub store_id: i32,
    pub invoice_number: String,
    pub total_cents: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::sale_items)]
#[diesel(belongs_to(Sale, foreign_key = sale_id))]
pub struct SaleItem {
    pub id: i32,
    pub sale_id: i32,
    pub item_id: Option<i32>,
    pub name: String,
    pub unit_price_cents: i32,
    pub quantity: i32,
    pub total_cents: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sales)]
pub struct NewSale<'a> {
    pub store_id: i32,
    pub invoice_number: &'a str,
    pub total_cents: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sale_items)]
pub struct NewSaleItem<'a> {
    pub sale_id: i32,
    pub item_id: Option<i32>,
    pub name: &'a str,
    pub unit_price_cents: i32,
    pub quantity: i32,
    pub total_cents: i32,
}

impl Sale {
    pub fn into_domain(self, items: Vec<SaleItem>) -> DomainSale {
        DomainSale {
            id: self.id,
            store_id: self.store_id,
            invoice_number: self.invoice_number,
            total_cents: self.total_cents,
            items: items.into_iter().map(SaleItem::into_domain).collect(),
            created_at: self.created_at,
        }
    }
}

impl SaleItem {
    pub fn into_domain(self) -> DomainSaleItem {
        DomainSaleItem {
            item_id: self.item_id,
            name: self.name,
            unit_price_cents: self.unit_price_cents,
            quantity: self.quantity,
            total_cents: self.total_cents,
        }
    }
}

impl From<(Sale, Vec<SaleItem>)> for DomainSale {
    fn from(value: (Sale, Vec<SaleItem>)) -> Self {
        value.0.into_domain(value.1)
    }
}
