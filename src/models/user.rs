use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::user::{
    NewUser as DomainNewUser, UpdateUser as DomainUpdateUser, User as DomainUser,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub name: &'a str,
    pub role: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::users)]
pub struct UpdateUser<'a> {
    pub name: &'a str,
    pub role: &'a str,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::store_access)]
pub struct StoreAccess {
    pub id: i32,
    pub user_id: i32,
    pub store_id: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::store_access)]
pub struct NewStoreAccess {
    pub user_id: i32,
    pub store_id: i32,
}

impl User {
    pub fn into_domain(self, store_ids: Vec<i32>) -> DomainUser {
        DomainUser {
            id: self.id,
            email: self.email,
            name: self.name,
            role: self.role.as_str().into(),
            store_ids,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<(User, Vec<i32>)> for DomainUser {
    fn from(value: (User, Vec<i32>)) -> Self {
        value.0.into_domain(value.1)
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(value: &'a DomainNewUser) -> Self {
        Self {
            email: value.email.as_str(),
            password_hash: value.password_hash.as_str(),
            name: value.name.as_str(),
            role: value.role.into(),
        }
    }
}

impl<'a> From<&'a DomainUpdateUser> for UpdateUser<'a> {
    fn from(value: &'a DomainUpdateUser) -> Self {
        Self {
            name: value.name.as_str(),
            role: value.role.into(),
            updated_at: value.updated_at,
        }
    }
}
