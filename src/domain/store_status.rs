use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Public open/closed banner attached to a store. Created on demand with
/// `is_open = true` the first time a store's status is read.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StoreStatus {
    pub id: i32,
    pub store_id: i32,
    pub is_open: bool,
    pub message: Option<String>,
    pub updated_at: NaiveDateTime,
}

/// Patch data applied when updating a store's status.
#[derive(Debug, Clone)]
pub struct UpdateStoreStatus {
    pub is_open: bool,
    pub message: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl UpdateStoreStatus {
    pub fn new(is_open: bool, message: Option<String>) -> Self {
        Self {
            is_open,
            message,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }
}
