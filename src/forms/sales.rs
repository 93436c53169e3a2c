use serde::{Deserialize, Serialize};
use validator::Validate;

/// One line of a sale submission. `item_id` links the line to a stocked item;
/// a free-form `name` covers off-menu charges.
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct SaleLineForm {
    #[serde(default)]
    pub item_id: Option<i32>,
    #[serde(default)]
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    #[validate(range(min = 0))]
    pub unit_price_cents: i32,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

/// JSON payload accepted by the sale creation endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSaleForm {
    #[validate(length(min = 1), nested)]
    pub items: Vec<SaleLineForm>,
}
