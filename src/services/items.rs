use crate::domain::auth::CurrentUser;
use crate::domain::item::{Item, ItemListQuery};
use crate::forms::items::{DecrementStockForm, SaveItemForm};
use crate::repository::{CategoryReader, ItemReader, ItemWriter, ProductReader, StoreReader};
use crate::services::stores::{resolve_public_store, resolve_selected_store};
use crate::services::{ServiceError, ServiceResult};
use validator::Validate;

/// List the items of the admin-selected store.
pub fn list_items_admin<R>(
    repo: &R,
    user: &CurrentUser,
    store_id: i32,
    category_id: Option<i32>,
) -> ServiceResult<(usize, Vec<Item>)>
where
    R: StoreReader + ItemReader + ?Sized,
{
    let store = resolve_selected_store(repo, user, store_id)?;

    let mut query = ItemListQuery::new(store.id);
    if let Some(category_id) = category_id {
        query = query.category_id(category_id);
    }

    repo.list_items(query).map_err(ServiceError::from)
}

/// List the items of the public store.
pub fn list_items_public<R>(
    repo: &R,
    fallback_slug: &str,
    category_id: Option<i32>,
) -> ServiceResult<(usize, Vec<Item>)>
where
    R: StoreReader + ItemReader + ?Sized,
{
    let store = resolve_public_store(repo, fallback_slug)?;

    let mut query = ItemListQuery::new(store.id);
    if let Some(category_id) = category_id {
        query = query.category_id(category_id);
    }

    repo.list_items(query).map_err(ServiceError::from)
}

/// Fetch one item of the admin-selected store.
pub fn get_item<R>(
    repo: &R,
    user: &CurrentUser,
    store_id: i32,
    item_id: i32,
) -> ServiceResult<Item>
where
    R: StoreReader + ItemReader + ?Sized,
{
    let store = resolve_selected_store(repo, user, store_id)?;

    repo.get_item_by_id(item_id, store.id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Create an item in the admin-selected store.
///
/// A linked category must belong to the same store. A linked product must
/// too, and donates its image reference at creation time; the copy is not
/// kept in sync afterwards.
pub fn create_item<R>(
    repo: &R,
    user: &CurrentUser,
    store_id: i32,
    form: SaveItemForm,
) -> ServiceResult<Item>
where
    R: StoreReader + CategoryReader + ProductReader + ItemWriter + ?Sized,
{
    let store = resolve_selected_store(repo, user, store_id)?;

    let mut new_item = form
        .into_new_item(store.id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if let Some(category_id) = new_item.category_id {
        repo.get_category_by_id(category_id, store.id)
            .map_err(ServiceError::from)?
            .ok_or(ServiceError::NotFound)?;
    }

    if let Some(product_id) = new_item.product_id {
        let product = repo
            .get_product_by_id(product_id, store.id)
            .map_err(ServiceError::from)?
            .ok_or(ServiceError::NotFound)?;

        if new_item.image_url.is_none() {
            new_item.image_url = product.image_url;
        }
    }

    repo.create_item(&new_item).map_err(ServiceError::from)
}

/// Update an item in the admin-selected store.
pub fn update_item<R>(
    repo: &R,
    user: &CurrentUser,
    store_id: i32,
    item_id: i32,
    form: SaveItemForm,
) -> ServiceResult<Item>
where
    R: StoreReader + CategoryReader + ItemWriter + ?Sized,
{
    let store = resolve_selected_store(repo, user, store_id)?;

    let update = form
        .into_update_item()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if let Some(category_id) = update.category_id {
        repo.get_category_by_id(category_id, store.id)
            .map_err(ServiceError::from)?
            .ok_or(ServiceError::NotFound)?;
    }

    repo.update_item(item_id, store.id, &update)
        .map_err(ServiceError::from)
}

/// Delete an item in the admin-selected store.
pub fn delete_item<R>(
    repo: &R,
    user: &CurrentUser,
    store_id: i32,
    item_id: i32,
) -> ServiceResult<()>
where
    R: StoreReader + ItemWriter + ?Sized,
{
    let store = resolve_selected_store(repo, user, store_id)?;

    repo.delete_item(item_id, store.id)
        .map_err(ServiceError::from)
}

/// Reduce an item's stock, clamping at zero.
pub fn decrement_item<R>(
    repo: &R,
    user: &CurrentUser,
    store_id: i32,
    item_id: i32,
    form: DecrementStockForm,
) -> ServiceResult<Item>
where
    R: StoreReader + ItemWriter + ?Sized,
{
    form.validate()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let store = resolve_selected_store(repo, user, store_id)?;

    repo.decrement_item_stock(item_id, store.id, form.quantity)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::category::{Category, CategoryListQuery};
    use crate::domain::item::{NewItem, UpdateItem as DomainUpdateItem};
    use crate::domain::product::{Product, ProductListQuery};
    use crate::domain::store::{Store, StoreListQuery};
    use crate::domain::user::UserRole;
    use crate::repository::errors::RepositoryResult;
    use crate::repository::mock::{
        MockCategoryReader, MockItemWriter, MockProductReader, MockStoreReader,
    };

    fn fixed_datetime() -> NaiveDateTime {
        match NaiveDate::from_ymd_opt(2026, 1, 1) {
            Some(date) => date.and_hms_opt(0, 0, 0).unwrap_or_default(),
            None => NaiveDateTime::default(),
        }
    }

    struct MockRepo {
        stores: MockStoreReader,
        categories: MockCategoryReader,
        products: MockProductReader,
        items: MockItemWriter,
    }

    impl MockRepo {
        fn new() -> Self {
            Self {
                stores: MockStoreReader::new(),
                categories: MockCategoryReader::new(),
                products: MockProductReader::new(),
                items: MockItemWriter::new(),
            }
        }
    }

    impl StoreReader for MockRepo {
        fn get_store_by_id(&self, id: i32) -> RepositoryResult<Option<Store>> {
            self.stores.get_store_by_id(id)
        }

        fn get_store_by_slug(&self, slug: &str) -> RepositoryResult<Option<Store>> {
            self.stores.get_store_by_slug(slug)
        }

        fn get_default_store(&self) -> RepositoryResult<Option<Store>> {
            self.stores.get_default_store()
        }

        fn list_stores(&self, query: StoreListQuery) -> RepositoryResult<(usize, Vec<Store>)> {
            self.stores.list_stores(query)
        }
    }

    impl CategoryReader for MockRepo {
        fn get_category_by_id(
            &self,
            id: i32,
            store_id: i32,
        ) -> RepositoryResult<Option<Category>> {
            self.categories.get_category_by_id(id, store_id)
        }

        fn list_categories(
            &self,
            query: CategoryListQuery,
        ) -> RepositoryResult<(usize, Vec<Category>)> {
            self.categories.list_categories(query)
        }
    }

    impl ProductReader for MockRepo {
        fn get_product_by_id(&self, id: i32, store_id: i32) -> RepositoryResult<Option<Product>> {
            self.products.get_product_by_id(id, store_id)
        }

        fn list_products(
            &self,
            query: ProductListQuery,
        ) -> RepositoryResult<(usize, Vec<Product>)> {
            self.products.list_products(query)
        }
    }

    impl ItemWriter for MockRepo {
        fn create_item(&self, new_item: &NewItem) -> RepositoryResult<Item> {
            self.items.create_item(new_item)
        }

        fn update_item(
            &self,
            item_id: i32,
            store_id: i32,
            updates: &DomainUpdateItem,
        ) -> RepositoryResult<Item> {
            self.items.update_item(item_id, store_id, updates)
        }

        fn delete_item(&self, item_id: i32, store_id: i32) -> RepositoryResult<()> {
            self.items.delete_item(item_id, store_id)
        }

        fn decrement_item_stock(
            &self,
            item_id: i32,
            store_id: i32,
            quantity: i32,
        ) -> RepositoryResult<Item> {
            self.items.decrement_item_stock(item_id, store_id, quantity)
        }
    }

    fn sample_store(id: i32) -> Store {
        Store {
            id,
            name: format!("Store {id}"),
            slug: format!("store-{id}"),
            is_default: false,
            is_active: true,
            invoice_name: None,
            invoice_address: None,
            invoice_phone: None,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn sample_item(id: i32, store_id: i32) -> Item {
        Item {
            id,
            store_id,
            category_id: None,
            product_id: None,
            name: "Espresso".to_string(),
            description: None,
            price_cents: 250,
            stock: 5,
            image_url: None,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn sample_product(id: i32, store_id: i32) -> Product {
        Product {
            id,
            store_id,
            name: "Espresso".to_string(),
            image_url: Some("https://cdn.example.com/espresso.png".to_string()),
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn member_of(store_ids: Vec<i32>) -> CurrentUser {
        CurrentUser {
            id: 1,
            email: "user@example.com".to_string(),
            name: "Tester".to_string(),
            role: UserRole::User,
            store_ids,
        }
    }

    fn item_form(product_id: Option<i32>) -> SaveItemForm {
        SaveItemForm {
            name: "Espresso".to_string(),
            description: None,
            price_cents: 250,
            stock: 5,
            category_id: None,
            product_id,
            image_url: None,
        }
    }

    #[test]
    fn create_item_denormalizes_product_image() {
        let mut repo = MockRepo::new();
        let user = member_of(vec![2]);

        repo.stores
            .expect_get_store_by_id()
            .times(1)
            .returning(|id| Ok(Some(sample_store(id))));
        repo.products
            .expect_get_product_by_id()
            .times(1)
            .withf(|id, store_id| {
                assert_eq!(*id, 8);
                assert_eq!(*store_id, 2);
                true
            })
            .returning(|id, store_id| Ok(Some(sample_product(id, store_id))));
        repo.items
            .expect_create_item()
            .times(1)
            .withf(|new_item| {
                assert_eq!(
                    new_item.image_url.as_deref(),
                    Some("https://cdn.example.com/espresso.png")
                );
                true
            })
            .returning(|new_item| {
                let mut item = sample_item(1, new_item.store_id);
                item.image_url = new_item.image_url.clone();
                Ok(item)
            });

        let created =
            create_item(&repo, &user, 2, item_form(Some(8))).expect("expected success");

        assert_eq!(
            created.image_url.as_deref(),
            Some("https://cdn.example.com/espresso.png")
        );
    }

    #[test]
    fn create_item_rejects_cross_store_product() {
        let mut repo = MockRepo::new();
        let user = member_of(vec![2]);

        repo.stores
            .expect_get_store_by_id()
            .times(1)
            .returning(|id| Ok(Some(sample_store(id))));
        // The product exists in another store so the scoped lookup misses.
        repo.products
            .expect_get_product_by_id()
            .times(1)
            .returning(|_, _| Ok(None));
        repo.items.expect_create_item().times(0);

        let result = create_item(&repo, &user, 2, item_form(Some(8)));

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn decrement_item_requires_positive_quantity() {
        let repo = MockRepo::new();
        let user = member_of(vec![2]);

        let result = decrement_item(&repo, &user, 2, 1, DecrementStockForm { quantity: 0 });

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn decrement_item_requires_store_access() {
        let mut repo = MockRepo::new();
        let user = member_of(vec![9]);

        repo.stores
            .expect_get_store_by_id()
            .times(1)
            .returning(|id| Ok(Some(sample_store(id))));
        repo.items.expect_decrement_item_stock().times(0);

        let result = decrement_item(&repo, &user, 2, 1, DecrementStockForm { quantity: 1 });

        assert!(matches!(result, Err(ServiceError::Forbidden)));
    }
}
