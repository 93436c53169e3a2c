use diesel::prelude::*;

use crate::{
    domain::category::{
        Category as DomainCategory, CategoryListQuery, NewCategory as DomainNewCategory,
        UpdateCategory as DomainUpdateCategory,
    },
    models::category::{
        Category as DbCategory, NewCategory as DbNewCategory, UpdateCategory as DbUpdateCategory,
    },
    repository::{CategoryReader, CategoryWriter, DieselRepository},
    repository::errors::{RepositoryError, RepositoryResult},
};

impl CategoryReader for DieselRepository {
    fn get_category_by_id(&self, id: i32, store_id: i32) -> RepositoryResult<Option<DomainCategory>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let category = categories::table
            .filter(categories::id.eq(id))
            .filter(categories::store_id.eq(store_id))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        Ok(category.map(Into::into))
    }

    fn list_categories(
        &self,
        query: CategoryListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainCategory>)> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let mut count_query = categories::table
            .filter(categories::store_id.eq(query.store_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            count_query = count_query.filter(categories::name.like(pattern));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = categories::table
            .filter(categories::store_id.eq(query.store_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            items = items.filter(categories::name.like(pattern));
        }

        items = items.order(categories::name.asc());

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset).limit(pagination.limit);
        }

        let db_categories = items.load::<DbCategory>(&mut conn)?;

        Ok((total, db_categories.into_iter().map(Into::into).collect()))
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, new_category: &DomainNewCategory) -> RepositoryResult<DomainCategory> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let db_new = DbNewCategory::from(new_category);

        let created = diesel::insert_into(categories::table)
            .values(&db_new)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(created.into())
    }

    fn update_category(
        &self,
        category_id: i32,
        store_id: i32,
        updates: &DomainUpdateCategory,
    ) -> RepositoryResult<DomainCategory> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateCategory::from(updates);

        let target = categories::table
            .filter(categories::id.eq(category_id))
            .filter(categories::store_id.eq(store_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_category(&self, category_id: i32, store_id: i32) -> RepositoryResult<()> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let target = categories::table
            .filter(categories::id.eq(category_id))
            .filter(categories::store_id.eq(store_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
