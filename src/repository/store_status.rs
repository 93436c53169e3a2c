use diesel::prelude::*;

use crate::{
    domain::store_status::{
        StoreStatus as DomainStoreStatus, UpdateStoreStatus as DomainUpdateStoreStatus,
    },
    models::store_status::{
        NewStoreStatus as DbNewStoreStatus, StoreStatus as DbStoreStatus,
        UpdateStoreStatus as DbUpdateStoreStatus,
    },
    repository::{DieselRepository, StoreStatusReader, StoreStatusWriter},
    repository::errors::{RepositoryError, RepositoryResult},
};

impl StoreStatusReader for DieselRepository {
    fn get_store_status(&self, store_id: i32) -> RepositoryResult<Option<DomainStoreStatus>> {
        use crate::schema::store_statuses;

        let mut conn = self.conn()?;
        let status = store_statuses::table
            .filter(store_statuses::store_id.eq(store_id))
            .first::<DbStoreStatus>(&mut conn)
            .optional()?;

        Ok(status.map(Into::into))
    }
}

impl StoreStatusWriter for DieselRepository {
    fn ensure_store_status(&self, store_id: i32) -> RepositoryResult<DomainStoreStatus> {
        use crate::schema::store_statuses;

        let mut conn = self.conn()?;

        conn.transaction::<DomainStoreStatus, RepositoryError, _>(|conn| {
            let existing = store_statuses::table
                .filter(store_statuses::store_id.eq(store_id))
                .first::<DbStoreStatus>(conn)
                .optional()?;

            if let Some(status) = existing {
                return Ok(status.into());
            }

            let created = diesel::insert_into(store_statuses::table)
                .values(&DbNewStoreStatus { store_id })
                .get_result::<DbStoreStatus>(conn)?;

            Ok(created.into())
        })
    }

    fn update_store_status(
        &self,
        store_id: i32,
        updates: &DomainUpdateStoreStatus,
    ) -> RepositoryResult<DomainStoreStatus> {
        use crate::schema::store_statuses;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateStoreStatus::from(updates);

        conn.transaction::<DomainStoreStatus, RepositoryError, _>(|conn| {
            let existing = store_statuses::table
                .filter(store_statuses::store_id.eq(store_id))
                .first::<DbStoreStatus>(conn)
                .optional()?;

            if existing.is_none() {
                diesel::insert_into(store_statuses::table)
                    .values(&DbNewStoreStatus { store_id })
                    .execute(conn)?;
            }

            let updated = diesel::update(
                store_statuses::table.filter(store_statuses::store_id.eq(store_id)),
            )
            .set(&db_updates)
            .get_result::<DbStoreStatus>(conn)?;

            Ok(updated.into())
        })
    }
}
