use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Prefix carried by every invoice number.
pub const INVOICE_PREFIX: &str = "INV";

/// Completed sale recorded for a store.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Sale {
    pub id: i32,
    pub store_id: i32,
    /// Human-readable identifier, unique per store: `INV-YYYYMMDD-NNN`.
    pub invoice_number: String,
    pub total_cents: i32,
    pub items: Vec<SaleItem>,
    pub created_at: NaiveDateTime,
}

/// Line item captured on a sale. Carries a denormalized name so the record
/// survives item deletion.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SaleItem {
    pub item_id: Option<i32>,
    pub name: String,
    pub unit_price_cents: i32,
    pub quantity: i32,
    pub total_cents: i32,
}

/// Payload required to record a new sale. The invoice number is assigned by
/// the repository when the sale is inserted.
#[derive(Debug, Clone)]
pub struct NewSale {
    pub store_id: i32,
    pub items: Vec<NewSaleItem>,
}

impl NewSale {
    pub fn new(store_id: i32, items: Vec<NewSaleItem>) -> Self {
        Self { store_id, items }
    }

    /// Sum of the per-line totals.
    pub fn total_cents(&self) -> i32 {
        self.items.iter().map(NewSaleItem::total_cents).sum()
    }
}

/// Line payload for a new sale.
#[derive(Debug, Clone)]
pub struct NewSaleItem {
    pub item_id: Option<i32>,
    pub name: String,
    pub unit_price_cents: i32,
    pub quantity: i32,
}

impl NewSaleItem {
    pub fn new(name: impl Into<String>, unit_price_cents: i32, quantity: i32) -> Self {
        Self {
            item_id: None,
            name: name.into(),
            unit_price_cents,
            quantity,
        }
    }

    pub fn with_item_id(mut self, item_id: i32) -> Self {
        self.item_id = Some(item_id);
        self
    }

    pub fn total_cents(&self) -> i32 {
        self.unit_price_cents * self.quantity
    }
}

/// Query definition used to list the sales of a store.
#[derive(Debug, Clone)]
pub struct SaleListQuery {
    pub store_id: i32,
    /// Restrict the results to sales recorded on this calendar day.
    pub date: Option<NaiveDate>,
    pub pagination: Option<Pagination>,
}

impl SaleListQuery {
    pub fn new(store_id: i32) -> Self {
        Self {
            store_id,
            date: None,
            pagination: None,
        }
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn paginate(mut self, limit: i64, offset: i64) -> Self {
        self.pagination = Some(Pagination::new(limit, offset));
        self
    }
}

/// One page of a store's sales ledger.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SalesPage {
    /// Number of sales matching the query before pagination.
    pub total: usize,
    /// Aggregate revenue over every matching sale, not just the page.
    pub revenue_cents: i64,
    pub sales: Vec<Sale>,
}

/// `INV-YYYYMMDD-` prefix shared by every invoice issued on `date`.
pub fn invoice_day_prefix(date: NaiveDate) -> String {
    format!("{INVOICE_PREFIX}-{}-", date.format("%Y%m%d"))
}

/// Format a full invoice number from a date and a daily sequence.
pub fn format_invoice_number(date: NaiveDate, sequence: u32) -> String {
    format!("{}{sequence:03}", invoice_day_prefix(date))
}

/// Extract the daily sequence from an invoice number, if it parses.
pub fn parse_invoice_sequence(invoice_number: &str) -> Option<u32> {
    invoice_number
        .rsplit_once('-')
        .and_then(|(_, sequence)| sequence.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).expect("valid date")
    }

    #[test]
    fn invoice_number_is_zero_padded() {
        assert_eq!(format_invoice_number(sample_date(), 1), "INV-20260806-001");
        assert_eq!(format_invoice_number(sample_date(), 42), "INV-20260806-042");
        assert_eq!(
            format_invoice_number(sample_date(), 1000),
            "INV-20260806-1000"
        );
    }

    #[test]
    fn invoice_sequence_round_trips() {
        let number = format_invoice_number(sample_date(), 7);
        assert_eq!(parse_invoice_sequence(&number), Some(7));
        assert_eq!(parse_invoice_sequence("garbage"), None);
    }

    #[test]
    fn sale_total_sums_line_totals() {
        let sale = NewSale::new(
            1,
            vec![
                NewSaleItem::new("Espresso", 100, 2),
                NewSaleItem::new("Croissant", 50, 1),
            ],
        );
        assert_eq!(sale.total_cents(), 250);
    }
}
