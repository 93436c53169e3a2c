use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::item::{
        Item as DomainItem, ItemListQuery, NewItem as DomainNewItem,
        UpdateItem as DomainUpdateItem,
    },
    models::item::{Item as DbItem, NewItem as DbNewItem, UpdateItem as DbUpdateItem},
    repository::{DieselRepository, ItemReader, ItemWriter},
    repository::errors::{RepositoryError, RepositoryResult},
};

impl ItemReader for DieselRepository {
    fn get_item_by_id(&self, id: i32, store_id: i32) -> RepositoryResult<Option<DomainItem>> {
        use crate::schema::items;

        let mut conn = self.conn()?;
        let item = items::table
            .filter(items::id.eq(id))
            .filter(items::store_id.eq(store_id))
            .first::<DbItem>(&mut conn)
            .optional()?;

        Ok(item.map(Into::into))
    }

    fn list_items(&self, query: ItemListQuery) -> RepositoryResult<(usize, Vec<DomainItem>)> {
        use crate::schema::items;

        let mut conn = self.conn()?;

        let mut count_query = items::table
            .filter(items::store_id.eq(query.store_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category_id) = query.category_id {
            count_query = count_query.filter(items::category_id.eq(Some(category_id)));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            count_query = count_query.filter(
                items::name
                    .like(pattern.clone())
                    .or(items::description.like(pattern)),
            );
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut rows = items::table
            .filter(items::store_id.eq(query.store_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category_id) = query.category_id {
            rows = rows.filter(items::category_id.eq(Some(category_id)));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            rows = rows.filter(
                items::name
                    .like(pattern.clone())
                    .or(items::description.like(pattern)),
            );
        }

        rows = rows.order(items::name.asc());

        if let Some(pagination) = &query.pagination {
            rows = rows.offset(pagination.offset).limit(pagination.limit);
        }

        let db_items = rows.load::<DbItem>(&mut conn)?;

        Ok((total, db_items.into_iter().map(Into::into).collect()))
    }
}

impl ItemWriter for DieselRepository {
    fn create_item(&self, new_item: &DomainNewItem) -> RepositoryResult<DomainItem> {
        use crate::schema::items;

        let mut conn = self.conn()?;
        let db_new = DbNewItem::from(new_item);

        let created = diesel::insert_into(items::table)
            .values(&db_new)
            .get_result::<DbItem>(&mut conn)?;

        Ok(created.into())
    }

    fn update_item(
        &self,
        item_id: i32,
        store_id: i32,
        updates: &DomainUpdateItem,
    ) -> RepositoryResult<DomainItem> {
        use crate::schema::items;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateItem::from(updates);

        let target = items::table
            .filter(items::id.eq(item_id))
            .filter(items::store_id.eq(store_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbItem>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_item(&self, item_id: i32, store_id: i32) -> RepositoryResult<()> {
        use crate::schema::items;

        let mut conn = self.conn()?;

        let target = items::table
            .filter(items::id.eq(item_id))
            .filter(items::store_id.eq(store_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    fn decrement_item_stock(
        &self,
        item_id: i32,
        store_id: i32,
        quantity: i32,
    ) -> RepositoryResult<DomainItem> {
        let mut conn = self.conn()?;

        conn.transaction::<DomainItem, RepositoryError, _>(|conn| {
            decrement_stock(conn, item_id, store_id, quantity)
        })
    }
}

/// Clamp-at-zero stock decrement. Callers must hold a transaction so the
/// read and the write see the same row.
pub(super) fn decrement_stock(
    conn: &mut SqliteConnection,
    item_id: i32,
    store_id: i32,
    quantity: i32,
) -> RepositoryResult<DomainItem> {
    use crate::schema::items;

    let current = items::table
        .filter(items::id.eq(item_id))
        .filter(items::store_id.eq(store_id))
        .first::<DbItem>(conn)
        .optional()?
        .ok_or(RepositoryError::NotFound)?;

    let remaining = (current.stock - quantity.max(0)).max(0);

    let updated = diesel::update(
        items::table
            .filter(items::id.eq(item_id))
            .filter(items::store_id.eq(store_id)),
    )
    .set((
        items::stock.eq(remaining),
        items::updated_at.eq(chrono::Local::now().naive_utc()),
    ))
    .get_result::<DbItem>(conn)?;

    Ok(updated.into())
}
