use actix_web::{HttpRequest, HttpResponse, Responder, ResponseError, get, put, web};

use crate::auth::provider::IdentityProvider;
use crate::auth::{AuthError, SelectedStore, resolve_current_user, selected_store_id};
use crate::config::ServerConfig;
use crate::domain::auth::CurrentUser;
use crate::forms::store_status::StoreStatusForm;
use crate::repository::DieselRepository;
use crate::routes::{ScopeQuery, service_error_response};
use crate::services::store_status as status_service;

#[get("/store-status")]
pub async fn get_store_status(
    query: web::Query<ScopeQuery>,
    repo: web::Data<DieselRepository>,
    provider: web::Data<IdentityProvider>,
    config: web::Data<ServerConfig>,
    req: HttpRequest,
) -> impl Responder {
    let result = if query.admin {
        let user = match resolve_current_user(&req, provider.get_ref(), repo.get_ref()).await {
            Ok(user) => user,
            Err(err) => return err.error_response(),
        };
        let Some(store_id) = selected_store_id(&req) else {
            return AuthError::NoStoreSelected.error_response();
        };

        status_service::admin_status(repo.get_ref(), &user, store_id)
    } else {
        status_service::public_status(repo.get_ref(), &config.default_store_slug)
    };

    match result {
        Ok(status) => HttpResponse::Ok().json(status),
        Err(err) => service_error_response(&err, "failed to fetch store status"),
    }
}

#[put("/store-status")]
pub async fn update_store_status(
    user: CurrentUser,
    store: SelectedStore,
    repo: web::Data<DieselRepository>,
    form: web::Json<StoreStatusForm>,
) -> impl Responder {
    match status_service::update_status(repo.get_ref(), &user, store.0, form.into_inner()) {
        Ok(status) => HttpResponse::Ok().json(status),
        Err(err) => service_error_response(&err, "failed to update store status"),
    }
}
