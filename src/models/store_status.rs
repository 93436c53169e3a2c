use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::store_status::{
    StoreStatus as DomainStoreStatus, UpdateStoreStatus as DomainUpdateStoreStatus,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::store_statuses)]
pub struct StoreStatus {
    pub id: i32,
    pub store_id: i32,
    pub is_open: bool,
    pub message: Option<String>,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::store_statuses)]
pub struct NewStoreStatus {
    pub store_id: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::store_statuses)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateStoreStatus<'a> {
    pub is_open: bool,
    pub message: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<StoreStatus> for DomainStoreStatus {
    fn from(value: StoreStatus) -> Self {
        Self {
            id: value.id,
            store_id: value.store_id,
            is_open: value.is_open,
            message: value.message,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateStoreStatus> for UpdateStoreStatus<'a> {
    fn from(value: &'a DomainUpdateStoreStatus) -> Self {
        Self {
            is_open: value.is_open,
            message: value.message.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
