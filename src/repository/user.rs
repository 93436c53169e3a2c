use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::user::{
        NewUser as DomainNewUser, UpdateUser as DomainUpdateUser, User as DomainUser,
        UserListQuery,
    },
    models::user::{
        NewStoreAccess as DbNewStoreAccess, NewUser as DbNewUser, StoreAccess as DbStoreAccess,
        UpdateUser as DbUpdateUser, User as DbUser,
    },
    repository::{DieselRepository, UserReader, UserWriter},
    repository::errors::{RepositoryError, RepositoryResult},
};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<DomainUser>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::id.eq(id))
            .first::<DbUser>(&mut conn)
            .optional()?;

        if let Some(db_user) = user {
            let mut grants = load_store_ids_for_users(&mut conn, &[db_user.id])?;
            let store_ids = grants.remove(&db_user.id).unwrap_or_default();
            Ok(Some(db_user.into_domain(store_ids)))
        } else {
            Ok(None)
        }
    }

    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<DomainUser>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::email.eq(email.to_lowercase()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        if let Some(db_user) = user {
            let mut grants = load_store_ids_for_users(&mut conn, &[db_user.id])?;
            let store_ids = grants.remove(&db_user.id).unwrap_or_default();
            Ok(Some(db_user.into_domain(store_ids)))
        } else {
            Ok(None)
        }
    }

    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<DomainUser>)> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let mut count_query = users::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            count_query = count_query.filter(
                users::name
                    .like(pattern.clone())
                    .or(users::email.like(pattern)),
            );
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = users::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            items = items.filter(
                users::name
                    .like(pattern.clone())
                    .or(users::email.like(pattern)),
            );
        }

        items = items.order(users::created_at.desc());

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset).limit(pagination.limit);
        }

        let db_users = items.load::<DbUser>(&mut conn)?;

        if db_users.is_empty() {
            return Ok((total, Vec::new()));
        }

        let user_ids: Vec<i32> = db_users.iter().map(|user| user.id).collect();
        let mut grants = load_store_ids_for_users(&mut conn, &user_ids)?;

        let users = db_users
            .into_iter()
            .map(|user| {
                let store_ids = grants.remove(&user.id).unwrap_or_default();
                user.into_domain(store_ids)
            })
            .collect();

        Ok((total, users))
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &DomainNewUser) -> RepositoryResult<DomainUser> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_new = DbNewUser::from(new_user);

        let created = diesel::insert_into(users::table)
            .values(&db_new)
            .get_result::<DbUser>(&mut conn)?;

        Ok(created.into_domain(Vec::new()))
    }

    fn update_user(
        &self,
        user_id: i32,
        updates: &DomainUpdateUser,
    ) -> RepositoryResult<DomainUser> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateUser::from(updates);

        let updated = diesel::update(users::table.filter(users::id.eq(user_id)))
            .set(&db_updates)
            .get_result::<DbUser>(&mut conn)?;

        let mut grants = load_store_ids_for_users(&mut conn, &[updated.id])?;
        let store_ids = grants.remove(&updated.id).unwrap_or_default();

        Ok(updated.into_domain(store_ids))
    }

    fn delete_user(&self, user_id: i32) -> RepositoryResult<()> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let deleted =
            diesel::delete(users::table.filter(users::id.eq(user_id))).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    fn set_store_access(&self, user_id: i32, store_ids: &[i32]) -> RepositoryResult<Vec<i32>> {
        use crate::schema::{store_access, users};

        let mut conn = self.conn()?;

        conn.transaction::<Vec<i32>, RepositoryError, _>(|conn| {
            let exists = users::table
                .filter(users::id.eq(user_id))
                .count()
                .get_result::<i64>(conn)?;
            if exists == 0 {
                return Err(RepositoryError::NotFound);
            }

            diesel::delete(store_access::table.filter(store_access::user_id.eq(user_id)))
                .execute(conn)?;

            if !store_ids.is_empty() {
                let payload: Vec<DbNewStoreAccess> = store_ids
                    .iter()
                    .map(|store_id| DbNewStoreAccess {
                        user_id,
                        store_id: *store_id,
                    })
                    .collect();

                diesel::insert_into(store_access::table)
                    .values(&payload)
                    .execute(conn)?;
            }

            let granted = store_access::table
                .filter(store_access::user_id.eq(user_id))
                .order(store_access::store_id.asc())
                .load::<DbStoreAccess>(conn)?;

            Ok(granted.into_iter().map(|grant| grant.store_id).collect())
        })
    }
}

fn load_store_ids_for_users(
    conn: &mut SqliteConnection,
    user_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<i32>>> {
    use crate::schema::store_access;

    if user_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = store_access::table
        .filter(store_access::user_id.eq_any(user_ids))
        .order(store_access::store_id.asc())
        .load::<DbStoreAccess>(conn)?;

    let mut map: HashMap<i32, Vec<i32>> = HashMap::new();
    for row in rows {
        map.entry(row.user_id).or_default().push(row.store_id);
    }

    Ok(map)
}
