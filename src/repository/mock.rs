use mockall::mock;

use super::{
    CategoryReader, CategoryWriter, ItemReader, ItemWriter, ProductReader, ProductWriter,
    SaleReader, SaleWriter, StoreReader, StoreStatusReader, StoreStatusWriter, StoreWriter,
    UserReader, UserWriter,
};
use crate::domain::{
    category::{Category, CategoryListQuery, NewCategory, UpdateCategory},
    item::{Item, ItemListQuery, NewItem, UpdateItem},
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
    sale::{NewSale, Sale, SaleListQuery, SalesPage},
    store::{NewStore, Store, StoreListQuery, UpdateStore},
    store_status::{StoreStatus, UpdateStoreStatus},
    user::{NewUser, UpdateUser, User, UserListQuery},
};
use crate::repository::errors::RepositoryResult;

mock! {
    pub StoreReader {}

    impl StoreReader for StoreReader {
        fn get_store_by_id(&self, id: i32) -> RepositoryResult<Option<Store>>;
        fn get_store_by_slug(&self, slug: &str) -> RepositoryResult<Option<Store>>;
        fn get_default_store(&self) -> RepositoryResult<Option<Store>>;
        fn list_stores(&self, query: StoreListQuery) -> RepositoryResult<(usize, Vec<Store>)>;
    }
}

mock! {
    pub StoreWriter {}

    impl StoreWriter for StoreWriter {
        fn create_store(&self, new_store: &NewStore) -> RepositoryResult<Store>;
        fn update_store(&self, store_id: i32, updates: &UpdateStore) -> RepositoryResult<Store>;
        fn delete_store(&self, store_id: i32) -> RepositoryResult<()>;
        fn set_default_store(&self, store_id: i32) -> RepositoryResult<Store>;
    }
}

mock! {
    pub UserReader {}

    impl UserReader for UserReader {
        fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
        fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
    }
}

mock! {
    pub UserWriter {}

    impl UserWriter for UserWriter {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn update_user(&self, user_id: i32, updates: &UpdateUser) -> RepositoryResult<User>;
        fn delete_user(&self, user_id: i32) -> RepositoryResult<()>;
        fn set_store_access(&self, user_id: i32, store_ids: &[i32]) -> RepositoryResult<Vec<i32>>;
    }
}

mock! {
    pub CategoryReader {}

    impl CategoryReader for CategoryReader {
        fn get_category_by_id(&self, id: i32, store_id: i32) -> RepositoryResult<Option<Category>>;
        fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<(usize, Vec<Category>)>;
    }
}

mock! {
    pub CategoryWriter {}

    impl CategoryWriter for CategoryWriter {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
        fn update_category(&self, category_id: i32, store_id: i32, updates: &UpdateCategory) -> RepositoryResult<Category>;
        fn delete_category(&self, category_id: i32, store_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32, store_id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn create_products(&self, new_products: &[NewProduct]) -> RepositoryResult<usize>;
        fn update_product(&self, product_id: i32, store_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32, store_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub ItemReader {}

    impl ItemReader for ItemReader {
        fn get_item_by_id(&self, id: i32, store_id: i32) -> RepositoryResult<Option<Item>>;
        fn list_items(&self, query: ItemListQuery) -> RepositoryResult<(usize, Vec<Item>)>;
    }
}

mock! {
    pub ItemWriter {}

    impl ItemWriter for ItemWriter {
        fn create_item(&self, new_item: &NewItem) -> RepositoryResult<Item>;
        fn update_item(&self, item_id: i32, store_id: i32, updates: &UpdateItem) -> RepositoryResult<Item>;
        fn delete_item(&self, item_id: i32, store_id: i32) -> RepositoryResult<()>;
        fn decrement_item_stock(&self, item_id: i32, store_id: i32, quantity: i32) -> RepositoryResult<Item>;
    }
}

mock! {
    pub SaleReader {}

    impl SaleReader for SaleReader {
        fn get_sale_by_id(&self, id: i32, store_id: i32) -> RepositoryResult<Option<Sale>>;
        fn list_sales(&self, query: SaleListQuery) -> RepositoryResult<SalesPage>;
    }
}

mock! {
    pub SaleWriter {}

    impl SaleWriter for SaleWriter {
        fn create_sale(&self, new_sale: &NewSale) -> RepositoryResult<Sale>;
    }
}

mock! {
    pub StoreStatusReader {}

    impl StoreStatusReader for StoreStatusReader {
        fn get_store_status(&self, store_id: i32) -> RepositoryResult<Option<StoreStatus>>;
    }
}

mock! {
    pub StoreStatusWriter {}

    impl StoreStatusWriter for StoreStatusWriter {
        fn ensure_store_status(&self, store_id: i32) -> RepositoryResult<StoreStatus>;
        fn update_store_status(&self, store_id: i32, updates: &UpdateStoreStatus) -> RepositoryResult<StoreStatus>;
    }
}
