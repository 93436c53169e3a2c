use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, CategoryListQuery, NewCategory, UpdateCategory};
use crate::domain::item::{Item, ItemListQuery, NewItem, UpdateItem};
use crate::domain::product::{NewProduct, Product, ProductListQuery, UpdateProduct};
use crate::domain::sale::{NewSale, Sale, SaleListQuery, SalesPage};
use crate::domain::store::{NewStore, Store, StoreListQuery, UpdateStore};
use crate::domain::store_status::{StoreStatus, UpdateStoreStatus};
use crate::domain::user::{NewUser, UpdateUser, User, UserListQuery};
use crate::repository::errors::RepositoryResult;

pub mod errors;

mod category;
mod item;
mod product;
mod sale;
mod store;
mod store_status;
mod user;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over store records.
pub trait StoreReader {
    fn get_store_by_id(&self, id: i32) -> RepositoryResult<Option<Store>>;
    fn get_store_by_slug(&self, slug: &str) -> RepositoryResult<Option<Store>>;
    /// The store currently flagged as the public default, if any.
    fn get_default_store(&self) -> RepositoryResult<Option<Store>>;
    fn list_stores(&self, query: StoreListQuery) -> RepositoryResult<(usize, Vec<Store>)>;
}

/// Write operations over store records.
pub trait StoreWriter {
    fn create_store(&self, new_store: &NewStore) -> RepositoryResult<Store>;
    fn update_store(&self, store_id: i32, updates: &UpdateStore) -> RepositoryResult<Store>;
    fn delete_store(&self, store_id: i32) -> RepositoryResult<()>;
    /// Promote `store_id` to the single default store. Unsets every other
    /// default flag in the same transaction.
    fn set_default_store(&self, store_id: i32) -> RepositoryResult<Store>;
}

/// Read-only operations over user records.
pub trait UserReader {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
}

/// Write operations over user records and their store-access grants.
pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    fn update_user(&self, user_id: i32, updates: &UpdateUser) -> RepositoryResult<User>;
    fn delete_user(&self, user_id: i32) -> RepositoryResult<()>;
    /// Replace the user's store-access list wholesale. The delete and the
    /// re-insert happen in one transaction; no intermediate state is
    /// observable.
    fn set_store_access(&self, user_id: i32, store_ids: &[i32]) -> RepositoryResult<Vec<i32>>;
}

/// Read-only operations over category records.
pub trait CategoryReader {
    fn get_category_by_id(&self, id: i32, store_id: i32) -> RepositoryResult<Option<Category>>;
    fn list_categories(&self, query: CategoryListQuery)
    -> RepositoryResult<(usize, Vec<Category>)>;
}

/// Write operations over category records.
pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    fn update_category(
        &self,
        category_id: i32,
        store_id: i32,
        updates: &UpdateCategory,
    ) -> RepositoryResult<Category>;
    fn delete_category(&self, category_id: i32, store_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over product records.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32, store_id: i32) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
}

/// Write operations over product records.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn create_products(&self, new_products: &[NewProduct]) -> RepositoryResult<usize>;
    fn update_product(
        &self,
        product_id: i32,
        store_id: i32,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product>;
    fn delete_product(&self, product_id: i32, store_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over item records.
pub trait ItemReader {
    fn get_item_by_id(&self, id: i32, store_id: i32) -> RepositoryResult<Option<Item>>;
    fn list_items(&self, query: ItemListQuery) -> RepositoryResult<(usize, Vec<Item>)>;
}

/// Write operations over item records.
pub trait ItemWriter {
    fn create_item(&self, new_item: &NewItem) -> RepositoryResult<Item>;
    fn update_item(
        &self,
        item_id: i32,
        store_id: i32,
        updates: &UpdateItem,
    ) -> RepositoryResult<Item>;
    fn delete_item(&self, item_id: i32, store_id: i32) -> RepositoryResult<()>;
    /// Reduce the item's stock by `quantity`, clamping at zero.
    fn decrement_item_stock(
        &self,
        item_id: i32,
        store_id: i32,
        quantity: i32,
    ) -> RepositoryResult<Item>;
}

/// Read-only operations over sale records.
pub trait SaleReader {
    fn get_sale_by_id(&self, id: i32, store_id: i32) -> RepositoryResult<Option<Sale>>;
    fn list_sales(&self, query: SaleListQuery) -> RepositoryResult<SalesPage>;
}

/// Write operations over sale records.
pub trait SaleWriter {
    /// Insert the sale with the next invoice number for the day and
    /// decrement the stock of every referenced item (clamped at zero), all
    /// in one transaction.
    fn create_sale(&self, new_sale: &NewSale) -> RepositoryResult<Sale>;
}

/// Read-only operations over store status records.
pub trait StoreStatusReader {
    fn get_store_status(&self, store_id: i32) -> RepositoryResult<Option<StoreStatus>>;
}

/// Write operations over store status records.
pub trait StoreStatusWriter {
    /// Fetch the store's status row, creating the open-by-default row if
    /// none exists yet.
    fn ensure_store_status(&self, store_id: i32) -> RepositoryResult<StoreStatus>;
    fn update_store_status(
        &self,
        store_id: i32,
        updates: &UpdateStoreStatus,
    ) -> RepositoryResult<StoreStatus>;
}
