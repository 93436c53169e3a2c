use diesel::prelude::*;

use crate::{
    domain::store::{
        NewStore as DomainNewStore, Store as DomainStore, StoreListQuery,
        UpdateStore as DomainUpdateStore,
    },
    models::store::{NewStore as DbNewStore, Store as DbStore, UpdateStore as DbUpdateStore},
    repository::{DieselRepository, StoreReader, StoreWriter},
    repository::errors::{RepositoryError, RepositoryResult},
};

impl StoreReader for DieselRepository {
    fn get_store_by_id(&self, id: i32) -> RepositoryResult<Option<DomainStore>> {
        use crate::schema::stores;

        let mut conn = self.conn()?;
        let store = stores::table
            .filter(stores::id.eq(id))
            .first::<DbStore>(&mut conn)
            .optional()?;

        Ok(store.map(Into::into))
    }

    fn get_store_by_slug(&self, slug: &str) -> RepositoryResult<Option<DomainStore>> {
        use crate::schema::stores;

        let mut conn = self.conn()?;
        let store = stores::table
            .filter(stores::slug.eq(slug))
            .first::<DbStore>(&mut conn)
            .optional()?;

        Ok(store.map(Into::into))
    }

    fn get_default_store(&self) -> RepositoryResult<Option<DomainStore>> {
        use crate::schema::stores;

        let mut conn = self.conn()?;
        let store = stores::table
            .filter(stores::is_default.eq(true))
            .filter(stores::is_active.eq(true))
            .first::<DbStore>(&mut conn)
            .optional()?;

        Ok(store.map(Into::into))
    }

    fn list_stores(&self, query: StoreListQuery) -> RepositoryResult<(usize, Vec<DomainStore>)> {
        use crate::schema::stores;

        let mut conn = self.conn()?;

        let mut count_query = stores::table.into_boxed::<diesel::sqlite::Sqlite>();

        if query.active_only {
            count_query = count_query.filter(stores::is_active.eq(true));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            count_query = count_query.filter(
                stores::name
                    .like(pattern.clone())
                    .or(stores::slug.like(pattern)),
            );
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = stores::table.into_boxed::<diesel::sqlite::Sqlite>();

        if query.active_only {
            items = items.filter(stores::is_active.eq(true));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            items = items.filter(
                stores::name
                    .like(pattern.clone())
                    .or(stores::slug.like(pattern)),
            );
        }

        items = items.order(stores::name.asc());

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset).limit(pagination.limit);
        }

        let db_stores = items.load::<DbStore>(&mut conn)?;

        Ok((total, db_stores.into_iter().map(Into::into).collect()))
    }
}

impl StoreWriter for DieselRepository {
    fn create_store(&self, new_store: &DomainNewStore) -> RepositoryResult<DomainStore> {
        use crate::schema::stores;

        let mut conn = self.conn()?;
        let db_new = DbNewStore::from(new_store);

        let created = diesel::insert_into(stores::table)
            .values(&db_new)
            .get_result::<DbStore>(&mut conn)?;

        Ok(created.into())
    }

    fn update_store(
        &self,
        store_id: i32,
        updates: &DomainUpdateStore,
    ) -> RepositoryResult<DomainStore> {
        use crate::schema::stores;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateStore::from(updates);

        let updated = diesel::update(stores::table.filter(stores::id.eq(store_id)))
            .set(&db_updates)
            .get_result::<DbStore>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_store(&self, store_id: i32) -> RepositoryResult<()> {
        use crate::schema::stores;

        let mut conn = self.conn()?;

        let deleted =
            diesel::delete(stores::table.filter(stores::id.eq(store_id))).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    fn set_default_store(&self, store_id: i32) -> RepositoryResult<DomainStore> {
        use crate::schema::stores;

        let mut conn = self.conn()?;

        conn.transaction::<DomainStore, RepositoryError, _>(|conn| {
            // Unset first so the partial unique index never sees two flags.
            diesel::update(stores::table.filter(stores::is_default.eq(true)))
                .set(stores::is_default.eq(false))
                .execute(conn)?;

            let promoted = diesel::update(stores::table.filter(stores::id.eq(store_id)))
                .set(stores::is_default.eq(true))
                .get_result::<DbStore>(conn)?;

            Ok(promoted.into())
        })
    }
}
