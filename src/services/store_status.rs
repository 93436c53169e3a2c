use crate::domain::auth::CurrentUser;
use crate::domain::store_status::StoreStatus;
use crate::forms::store_status::StoreStatusForm;
use crate::repository::{StoreReader, StoreStatusWriter};
use crate::services::stores::{resolve_public_store, resolve_selected_store};
use crate::services::{ServiceError, ServiceResult};

/// Public open/closed banner of the public store, created on first read.
pub fn public_status<R>(repo: &R, fallback_slug: &str) -> ServiceResult<StoreStatus>
where
    R: StoreReader + StoreStatusWriter + ?Sized,
{
    let store = resolve_public_store(repo, fallback_slug)?;

    repo.ensure_store_status(store.id)
        .map_err(ServiceError::from)
}

/// Banner of the admin-selected store, created on first read.
pub fn admin_status<R>(repo: &R, user: &CurrentUser, store_id: i32) -> ServiceResult<StoreStatus>
where
    R: StoreReader + StoreStatusWriter + ?Sized,
{
    let store = resolve_selected_store(repo, user, store_id)?;

    repo.ensure_store_status(store.id)
        .map_err(ServiceError::from)
}

/// Update the banner. Only the default store's banner is shown publicly, so
/// updates are restricted to it.
pub fn update_status<R>(
    repo: &R,
    user: &CurrentUser,
    store_id: i32,
    form: StoreStatusForm,
) -> ServiceResult<StoreStatus>
where
    R: StoreReader + StoreStatusWriter + ?Sized,
{
    let store = resolve_selected_store(repo, user, store_id)?;

    if !store.is_default {
        return Err(ServiceError::Forbidden);
    }

    let update = form
        .into_update()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_store_status(store.id, &update)
        .map_err(ServiceError::from)
}
