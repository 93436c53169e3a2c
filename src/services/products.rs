use crate::domain::auth::CurrentUser;
use crate::domain::product::{NewProduct, Product, ProductListQuery};
use crate::forms::products::{CopyProductsForm, ProductForm};
use crate::repository::{ProductReader, ProductWriter, StoreReader};
use crate::services::stores::resolve_selected_store;
use crate::services::{ServiceError, ServiceResult};
use validator::Validate;

/// List the products of the admin-selected store.
pub fn list_products<R>(
    repo: &R,
    user: &CurrentUser,
    store_id: i32,
) -> ServiceResult<(usize, Vec<Product>)>
where
    R: StoreReader + ProductReader + ?Sized,
{
    let store = resolve_selected_store(repo, user, store_id)?;

    repo.list_products(ProductListQuery::new(store.id))
        .map_err(ServiceError::from)
}

/// Fetch one product of the admin-selected store.
pub fn get_product<R>(
    repo: &R,
    user: &CurrentUser,
    store_id: i32,
    product_id: i32,
) -> ServiceResult<Product>
where
    R: StoreReader + ProductReader + ?Sized,
{
    let store = resolve_selected_store(repo, user, store_id)?;

    repo.get_product_by_id(product_id, store.id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Create a product in the admin-selected store.
pub fn create_product<R>(
    repo: &R,
    user: &CurrentUser,
    store_id: i32,
    form: ProductForm,
) -> ServiceResult<Product>
where
    R: StoreReader + ProductWriter + ?Sized,
{
    let store = resolve_selected_store(repo, user, store_id)?;

    let new_product = form
        .into_new_product(store.id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_product(&new_product).map_err(ServiceError::from)
}

/// Update a product in the admin-selected store.
pub fn update_product<R>(
    repo: &R,
    user: &CurrentUser,
    store_id: i32,
    product_id: i32,
    form: ProductForm,
) -> ServiceResult<Product>
where
    R: StoreReader + ProductWriter + ?Sized,
{
    let store = resolve_selected_store(repo, user, store_id)?;

    let update = form
        .into_update_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_product(product_id, store.id, &update)
        .map_err(ServiceError::from)
}

/// Delete a product in the admin-selected store.
pub fn delete_product<R>(
    repo: &R,
    user: &CurrentUser,
    store_id: i32,
    product_id: i32,
) -> ServiceResult<()>
where
    R: StoreReader + ProductWriter + ?Sized,
{
    let store = resolve_selected_store(repo, user, store_id)?;

    repo.delete_product(product_id, store.id)
        .map_err(ServiceError::from)
}

/// Copy products from the admin-selected store into another store the
/// caller can access. Returns the number of copies created.
pub fn copy_products<R>(
    repo: &R,
    user: &CurrentUser,
    store_id: i32,
    form: CopyProductsForm,
) -> ServiceResult<usize>
where
    R: StoreReader + ProductReader + ProductWriter + ?Sized,
{
    form.validate()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let source = resolve_selected_store(repo, user, store_id)?;
    let target = resolve_selected_store(repo, user, form.target_store_id)?;

    if source.id == target.id {
        return Err(ServiceError::Form(
            "target store must differ from the source store".to_string(),
        ));
    }

    let mut copies = Vec::with_capacity(form.product_ids.len());
    for product_id in &form.product_ids {
        let product = repo
            .get_product_by_id(*product_id, source.id)
            .map_err(ServiceError::from)?
            .ok_or(ServiceError::NotFound)?;

        let mut copy = NewProduct::new(target.id, product.name);
        if let Some(image_url) = product.image_url {
            copy = copy.with_image_url(image_url);
        }
        copies.push(copy);
    }

    repo.create_products(&copies).map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::product::UpdateProduct as DomainUpdateProduct;
    use crate::domain::store::{Store, StoreListQuery};
    use crate::domain::user::UserRole;
    use crate::repository::errors::RepositoryResult;
    use crate::repository::mock::{MockProductReader, MockProductWriter, MockStoreReader};

    fn fixed_datetime() -> NaiveDateTime {
        match NaiveDate::from_ymd_opt(2026, 1, 1) {
            Some(date) => date.and_hms_opt(0, 0, 0).unwrap_or_default(),
            None => NaiveDateTime::default(),
        }
    }

    struct MockRepo {
        stores: MockStoreReader,
        reader: MockProductReader,
        writer: MockProductWriter,
    }

    impl MockRepo {
        fn new() -> Self {
            Self {
                stores: MockStoreReader::new(),
                reader: MockProductReader::new(),
                writer: MockProductWriter::new(),
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

    impl ProductReader for MockRepo {
        fn get_product_by_id(&self, id: i32, store_id: i32) -> RepositoryResult<Option<Product>> {
            self.reader.get_product_by_id(id, store_id)
        }

        fn list_products(
            &self,
            query: ProductListQuery,
        ) -> RepositoryResult<(usize, Vec<Product>)> {
            self.reader.list_products(query)
        }
    }

    impl ProductWriter for MockRepo {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
            self.writer.create_product(new_product)
        }

        fn create_products(&self, new_products: &[NewProduct]) -> RepositoryResult<usize> {
            self.writer.create_products(new_products)
        }

        fn update_product(
            &self,
            product_id: i32,
            store_id: i32,
            updates: &DomainUpdateProduct,
        ) -> RepositoryResult<Product> {
            self.writer.update_product(product_id, store_id, updates)
        }

        fn delete_product(&self, product_id: i32, store_id: i32) -> RepositoryResult<()> {
            self.writer.delete_product(product_id, store_id)
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

    fn sample_product(id: i32, store_id: i32, name: &str) -> Product {
        Product {
            id,
            store_id,
            name: name.to_string(),
            image_url: Some("https://cdn.example.com/p.png".to_string()),
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn admin() -> CurrentUser {
        CurrentUser {
            id: 1,
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            role: UserRole::Admin,
            store_ids: Vec::new(),
        }
    }

    #[test]
    fn copy_products_copies_into_target_store() {
        let mut repo = MockRepo::new();
        let user = admin();

        repo.stores
            .expect_get_store_by_id()
            .times(2)
            .returning(|id| Ok(Some(sample_store(id))));
        repo.reader
            .expect_get_product_by_id()
            .times(2)
            .returning(|id, store_id| Ok(Some(sample_product(id, store_id, "Latte"))));
        repo.writer
            .expect_create_products()
            .times(1)
            .withf(|copies| {
                assert_eq!(copies.len(), 2);
                assert!(copies.iter().all(|copy| copy.store_id == 9));
                true
            })
            .returning(|copies| Ok(copies.len()));

        let form = CopyProductsForm {
            product_ids: vec![1, 2],
            target_store_id: 9,
        };

        let copied = copy_products(&repo, &user, 4, form).expect("expected success");

        assert_eq!(copied, 2);
    }

    #[test]
    fn copy_products_rejects_same_store() {
        let mut repo = MockRepo::new();
        let user = admin();

        repo.stores
            .expect_get_store_by_id()
            .times(2)
            .returning(|id| Ok(Some(sample_store(id))));

        let form = CopyProductsForm {
            product_ids: vec![1],
            target_store_id: 4,
        };

        let result = copy_products(&repo, &user, 4, form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn copy_products_missing_source_product_is_not_found() {
        let mut repo = MockRepo::new();
        let user = admin();

        repo.stores
            .expect_get_store_by_id()
            .times(2)
            .returning(|id| Ok(Some(sample_store(id))));
        repo.reader
            .expect_get_product_by_id()
            .times(1)
            .returning(|_, _| Ok(None));

        let form = CopyProductsForm {
            product_ids: vec![1],
            target_store_id: 9,
        };

        let result = copy_products(&repo, &user, 4, form);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
