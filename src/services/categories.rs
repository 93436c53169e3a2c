use crate::domain::auth::CurrentUser;
use crate::domain::category::{Category, CategoryListQuery};
use crate::forms::categories::CategoryForm;
use crate::repository::{CategoryReader, CategoryWriter, StoreReader};
use crate::services::stores::{resolve_public_store, resolve_selected_store};
use crate::services::{ServiceError, ServiceResult};

/// List the categories of the admin-selected store.
pub fn list_categories_admin<R>(
    repo: &R,
    user: &CurrentUser,
    store_id: i32,
) -> ServiceResult<(usize, Vec<Category>)>
where
    R: StoreReader + CategoryReader + ?Sized,
{
    let store = resolve_selected_store(repo, user, store_id)?;

    repo.list_categories(CategoryListQuery::new(store.id))
        .map_err(ServiceError::from)
}

/// List the categories of the public store.
pub fn list_categories_public<R>(
    repo: &R,
    fallback_slug: &str,
) -> ServiceResult<(usize, Vec<Category>)>
where
    R: StoreReader + CategoryReader + ?Sized,
{
    let store = resolve_public_store(repo, fallback_slug)?;

    repo.list_categories(CategoryListQuery::new(store.id))
        .map_err(ServiceError::from)
}

/// Create a category in the admin-selected store.
pub fn create_category<R>(
    repo: &R,
    user: &CurrentUser,
    store_id: i32,
    form: CategoryForm,
) -> ServiceResult<Category>
where
    R: StoreReader + CategoryWriter + ?Sized,
{
    let store = resolve_selected_store(repo, user, store_id)?;

    let new_category = form
        .into_new_category(store.id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_category(&new_category)
        .map_err(ServiceError::from)
}

/// Rename a category in the admin-selected store.
pub fn update_category<R>(
    repo: &R,
    user: &CurrentUser,
    store_id: i32,
    category_id: i32,
    form: CategoryForm,
) -> ServiceResult<Category>
where
    R: StoreReader + CategoryWriter + ?Sized,
{
    let store = resolve_selected_store(repo, user, store_id)?;

    let update = form
        .into_update_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_category(category_id, store.id, &update)
        .map_err(ServiceError::from)
}

/// Delete a category in the admin-selected store.
pub fn delete_category<R>(
    repo: &R,
    user: &CurrentUser,
    store_id: i32,
    category_id: i32,
) -> ServiceResult<()>
where
    R: StoreReader + CategoryWriter + ?Sized,
{
    let store = resolve_selected_store(repo, user, store_id)?;

    repo.delete_category(category_id, store.id)
        .map_err(ServiceError::from)
}
