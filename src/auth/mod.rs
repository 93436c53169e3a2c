//! Request identity resolution: cookie handling, the identity-provider
//! round trip with silent renewal, and the per-request extractors.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpMessage, HttpRequest, HttpResponse, ResponseError, web};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};
use thiserror::Error;

use crate::auth::provider::{IdentityProvider, ProviderError, Session};
use crate::domain::auth::CurrentUser;
use crate::repository::{DieselRepository, UserReader};

pub mod password;
pub mod provider;

/// Cookie carrying the provider access token.
pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";
/// Cookie carrying the provider refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "sb-refresh-token";
/// Cookie carrying the admin panel's selected store id.
pub const CURRENT_STORE_COOKIE: &str = "current-store-id";

const ACCESS_COOKIE_DAYS: i64 = 7;
const REFRESH_COOKIE_DAYS: i64 = 30;
const STORE_COOKIE_DAYS: i64 = 7;

/// Session renewed mid-request; picked up by the response middleware which
/// re-issues both token cookies.
#[derive(Debug, Clone)]
pub struct RenewedSession(pub Session);

/// Failures raised while resolving the request identity or store selection.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authentication required")]
    Unauthenticated,
    /// Token invalid and renewal failed; both cookies are cleared.
    #[error("session expired")]
    SessionExpired,
    #[error("no store selected")]
    NoStoreSelected,
    #[error("authentication backend unavailable")]
    Misconfigured,
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::NoStoreSelected => StatusCode::BAD_REQUEST,
            AuthError::Misconfigured => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if matches!(self, AuthError::SessionExpired) {
            builder.cookie(expired_cookie(ACCESS_TOKEN_COOKIE));
            builder.cookie(expired_cookie(REFRESH_TOKEN_COOKIE));
        }
        builder.json(serde_json::json!({ "error": self.to_string() }))
    }
}

fn session_cookie(name: &'static str, value: String, days: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::days(days))
        .finish()
}

pub fn access_cookie(token: &str, secure: bool) -> Cookie<'static> {
    session_cookie(
        ACCESS_TOKEN_COOKIE,
        token.to_string(),
        ACCESS_COOKIE_DAYS,
        secure,
    )
}

pub fn refresh_cookie(token: &str, secure: bool) -> Cookie<'static> {
    session_cookie(
        REFRESH_TOKEN_COOKIE,
        token.to_string(),
        REFRESH_COOKIE_DAYS,
        secure,
    )
}

pub fn store_cookie(store_id: i32, secure: bool) -> Cookie<'static> {
    session_cookie(
        CURRENT_STORE_COOKIE,
        store_id.to_string(),
        STORE_COOKIE_DAYS,
        secure,
    )
}

/// A removal cookie for `name`, matched by path.
pub fn expired_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::build(name, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();
    cookie.make_removal();
    cookie
}

/// Resolve the verified identity behind the request's token cookies and map
/// it to the local user record.
///
/// An invalid access token triggers one silent renewal through the refresh
/// token; the renewed session is stashed in the request extensions for the
/// response middleware. Every failure is unauthenticated, never a cached
/// success.
pub async fn resolve_current_user(
    req: &HttpRequest,
    provider: &IdentityProvider,
    repo: &DieselRepository,
) -> Result<CurrentUser, AuthError> {
    let Some(access) = req.cookie(ACCESS_TOKEN_COOKIE) else {
        return Err(AuthError::Unauthenticated);
    };

    let identity = match provider.get_user(access.value()).await {
        Ok(identity) => identity,
        Err(ProviderError::Unauthorized) => {
            let Some(refresh) = req.cookie(REFRESH_TOKEN_COOKIE) else {
                return Err(AuthError::SessionExpired);
            };

            let session = provider.refresh(refresh.value()).await.map_err(|err| {
                log::debug!("session renewal failed: {err}");
                AuthError::SessionExpired
            })?;

            let identity = provider
                .get_user(&session.access_token)
                .await
                .map_err(|err| {
                    log::debug!("renewed token rejected: {err}");
                    AuthError::SessionExpired
                })?;

            req.extensions_mut().insert(RenewedSession(session));
            identity
        }
        Err(err) => {
            log::error!("identity verification failed: {err}");
            return Err(AuthError::Unauthenticated);
        }
    };

    let user = repo
        .get_user_by_email(&identity.email)
        .map_err(|err| {
            log::error!("local user lookup failed: {err}");
            AuthError::Unauthenticated
        })?
        // A verified identity without a mirrored local row stays
        // unauthenticated until login or an admin creates the record.
        .ok_or(AuthError::Unauthenticated)?;

    Ok(user.into())
}

impl FromRequest for CurrentUser {
    type Error = AuthError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let provider = req
                .app_data::<web::Data<IdentityProvider>>()
                .ok_or(AuthError::Misconfigured)?
                .clone();
            let repo = req
                .app_data::<web::Data<DieselRepository>>()
                .ok_or(AuthError::Misconfigured)?
                .clone();

            resolve_current_user(&req, provider.get_ref(), repo.get_ref()).await
        })
    }
}

/// The store id selected through the admin store-selection endpoint. Absent
/// cookie means no selection; admin endpoints treat that as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedStore(pub i32);

pub fn selected_store_id(req: &HttpRequest) -> Option<i32> {
    req.cookie(CURRENT_STORE_COOKIE)
        .and_then(|cookie| cookie.value().parse().ok())
}

impl FromRequest for SelectedStore {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            selected_store_id(req)
                .map(SelectedStore)
                .ok_or(AuthError::NoStoreSelected),
        )
    }
}
