use validator::Validate;

use crate::domain::auth::CurrentUser;
use crate::domain::store::{Store, StoreListQuery};
use crate::forms::stores::{SaveStoreForm, SelectStoreForm};
use crate::repository::{StoreReader, StoreWriter};
use crate::services::{ServiceError, ServiceResult, ensure_admin, ensure_store_access};

/// Resolve the store behind the admin "current store" cookie and check the
/// caller may operate in it.
pub fn resolve_selected_store<R>(
    repo: &R,
    user: &CurrentUser,
    store_id: i32,
) -> ServiceResult<Store>
where
    R: StoreReader + ?Sized,
{
    let store = repo
        .get_store_by_id(store_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    ensure_store_access(user, store.id)?;

    Ok(store)
}

/// Resolve the store shown to unauthenticated visitors: the active default
/// store, else the active store matching the configured fallback slug.
///
/// The default flag wins when both exist. Neither resolving is a deployment
/// configuration error, not a client error.
pub fn resolve_public_store<R>(repo: &R, fallback_slug: &str) -> ServiceResult<Store>
where
    R: StoreReader + ?Sized,
{
    if let Some(store) = repo.get_default_store().map_err(ServiceError::from)? {
        return Ok(store);
    }

    let fallback = repo
        .get_store_by_slug(fallback_slug)
        .map_err(ServiceError::from)?
        .filter(|store| store.is_active);

    fallback.ok_or_else(|| {
        ServiceError::Configuration(format!(
            "no default store and no active store with slug `{fallback_slug}`"
        ))
    })
}

/// List every store. Admin only.
pub fn list_stores<R>(repo: &R, user: &CurrentUser) -> ServiceResult<(usize, Vec<Store>)>
where
    R: StoreReader + ?Sized,
{
    ensure_admin(user)?;

    repo.list_stores(StoreListQuery::new())
        .map_err(ServiceError::from)
}

/// Fetch one store by id. Admin only.
pub fn get_store<R>(repo: &R, user: &CurrentUser, store_id: i32) -> ServiceResult<Store>
where
    R: StoreReader + ?Sized,
{
    ensure_admin(user)?;

    repo.get_store_by_id(store_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Create a store, optionally promoting it to the public default.
pub fn create_store<R>(repo: &R, user: &CurrentUser, form: SaveStoreForm) -> ServiceResult<Store>
where
    R: StoreReader + StoreWriter + ?Sized,
{
    ensure_admin(user)?;

    let (new_store, wants_default) = form
        .into_new_store()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let created = repo.create_store(&new_store).map_err(ServiceError::from)?;

    if wants_default == Some(true) {
        return repo
            .set_default_store(created.id)
            .map_err(ServiceError::from);
    }

    Ok(created)
}

/// Update a store's identity fields, optionally promoting it to the default.
///
/// Demoting a default without promoting a replacement is rejected so the
/// deployment always keeps exactly one default store.
pub fn update_store<R>(
    repo: &R,
    user: &CurrentUser,
    store_id: i32,
    form: SaveStoreForm,
) -> ServiceResult<Store>
where
    R: StoreReader + StoreWriter + ?Sized,
{
    ensure_admin(user)?;

    let (updates, wants_default) = form
        .into_update_store()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let current = repo
        .get_store_by_id(store_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if wants_default == Some(false) && current.is_default {
        return Err(ServiceError::Form(
            "demote the default store by promoting another store".to_string(),
        ));
    }

    let updated = repo
        .update_store(store_id, &updates)
        .map_err(ServiceError::from)?;

    if wants_default == Some(true) && !updated.is_default {
        return repo
            .set_default_store(updated.id)
            .map_err(ServiceError::from);
    }

    Ok(updated)
}

/// Delete a store and everything scoped to it. Refused for the default
/// store.
pub fn delete_store<R>(repo: &R, user: &CurrentUser, store_id: i32) -> ServiceResult<()>
where
    R: StoreReader + StoreWriter + ?Sized,
{
    ensure_admin(user)?;

    let store = repo
        .get_store_by_id(store_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if store.is_default {
        return Err(ServiceError::Form(
            "the default store cannot be deleted".to_string(),
        ));
    }

    repo.delete_store(store_id).map_err(ServiceError::from)
}

/// Validate a store-selection request. The caller persists the returned
/// store's id into the selection cookie. Selecting an already-selected store
/// succeeds again without side effects.
pub fn select_store<R>(
    repo: &R,
    user: &CurrentUser,
    form: SelectStoreForm,
) -> ServiceResult<Store>
where
    R: StoreReader + ?Sized,
{
    form.validate()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let store = repo
        .get_store_by_id(form.store_id)
        .map_err(ServiceError::from)?
        .filter(|store| store.is_active)
        .ok_or(ServiceError::NotFound)?;

    ensure_store_access(user, store.id)?;

    Ok(store)
}

/// Active stores visible to the caller: every one for admins, granted ones
/// otherwise.
pub fn accessible_stores<R>(repo: &R, user: &CurrentUser) -> ServiceResult<Vec<Store>>
where
    R: StoreReader + ?Sized,
{
    let (_, stores) = repo
        .list_stores(StoreListQuery::new().active_only())
        .map_err(ServiceError::from)?;

    if user.is_admin() {
        return Ok(stores);
    }

    Ok(stores
        .into_iter()
        .filter(|store| user.store_ids.contains(&store.id))
        .collect())
}
