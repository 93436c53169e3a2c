use thiserror::Error;

use crate::auth::provider::ProviderError;
use crate::domain::auth::CurrentUser;
use crate::repository::errors::RepositoryError;

pub mod auth;
pub mod categories;
pub mod items;
pub mod products;
pub mod sales;
pub mod store_status;
pub mod stores;
pub mod users;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the service layer. Routes map each variant to one
/// HTTP status; everything else becomes an opaque 500.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No verified identity behind the request.
    #[error("authentication required")]
    Unauthorized,
    /// Identity verified but the role or store membership does not allow the
    /// operation.
    #[error("insufficient permissions")]
    Forbidden,
    /// Missing row, or a row outside the resolved store's scope. The two are
    /// indistinguishable so cross-tenant existence never leaks.
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Form(String),
    #[error("already exists")]
    Conflict,
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("internal error: {0}")]
    Internal(String),
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Conflict(_) => ServiceError::Conflict,
            other => ServiceError::Repository(other),
        }
    }
}

impl From<ProviderError> for ServiceError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Unauthorized => ServiceError::Unauthorized,
            ProviderError::AlreadyExists => ServiceError::Conflict,
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

/// Governance operations (store identity, user management) require the
/// admin role even when the caller holds plain store access.
pub(crate) fn ensure_admin(user: &CurrentUser) -> ServiceResult<()> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(ServiceError::Forbidden)
    }
}

/// Operational access to a store: admins unconditionally, everyone else by
/// explicit grant.
pub(crate) fn ensure_store_access(user: &CurrentUser, store_id: i32) -> ServiceResult<()> {
    if user.has_access(store_id) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden)
    }
}
