use actix_web::{
    HttpRequest, HttpResponse, Responder, ResponseError, delete, get, post, put, web,
};
use serde::Deserialize;

use crate::auth::provider::IdentityProvider;
use crate::auth::{AuthError, SelectedStore, resolve_current_user, selected_store_id};
use crate::config::ServerConfig;
use crate::domain::auth::CurrentUser;
use crate::forms::items::{DecrementStockForm, SaveItemForm};
use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::items as item_service;

/// Query parameters accepted by the items list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ItemsQuery {
    #[serde(default)]
    pub admin: bool,
    pub category_id: Option<i32>,
}

#[get("/items")]
pub async fn list_items(
    query: web::Query<ItemsQuery>,
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

        item_service::list_items_admin(repo.get_ref(), &user, store_id, query.category_id)
    } else {
        item_service::list_items_public(
            repo.get_ref(),
            &config.default_store_slug,
            query.category_id,
        )
    };

    match result {
        Ok((total, items)) => {
            HttpResponse::Ok().json(serde_json::json!({ "total": total, "items": items }))
        }
        Err(err) => service_error_response(&err, "failed to list items"),
    }
}

#[get("/items/{item_id}")]
pub async fn get_item(
    path: web::Path<i32>,
    user: CurrentUser,
    store: SelectedStore,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match item_service::get_item(repo.get_ref(), &user, store.0, path.into_inner()) {
        Ok(item) => HttpResponse::Ok().json(item),
        Err(err) => service_error_response(&err, "failed to fetch item"),
    }
}

#[post("/items")]
pub async fn create_item(
    user: CurrentUser,
    store: SelectedStore,
    repo: web::Data<DieselRepository>,
    form: web::Json<SaveItemForm>,
) -> impl Responder {
    match item_service::create_item(repo.get_ref(), &user, store.0, form.into_inner()) {
        Ok(item) => HttpResponse::Created().json(item),
        Err(err) => service_error_response(&err, "failed to create item"),
    }
}

#[put("/items/{item_id}")]
pub async fn update_item(
    path: web::Path<i32>,
    user: CurrentUser,
    store: SelectedStore,
    repo: web::Data<DieselRepository>,
    form: web::Json<SaveItemForm>,
) -> impl Responder {
    match item_service::update_item(
        repo.get_ref(),
        &user,
        store.0,
        path.into_inner(),
        form.into_inner(),
    ) {
        Ok(item) => HttpResponse::Ok().json(item),
        Err(err) => service_error_response(&err, "failed to update item"),
    }
}

#[delete("/items/{item_id}")]
pub async fn delete_item(
    path: web::Path<i32>,
    user: CurrentUser,
    store: SelectedStore,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let item_id = path.into_inner();

    match item_service::delete_item(repo.get_ref(), &user, store.0, item_id) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "message": "item deleted" })),
        Err(err) => service_error_response(&err, "failed to delete item"),
    }
}

#[post("/items/{item_id}/decrement")]
pub async fn decrement_item(
    path: web::Path<i32>,
    user: CurrentUser,
    store: SelectedStore,
    repo: web::Data<DieselRepository>,
    form: web::Json<DecrementStockForm>,
) -> impl Responder {
    match item_service::decrement_item(
        repo.get_ref(),
        &user,
        store.0,
        path.into_inner(),
        form.into_inner(),
    ) {
        Ok(item) => HttpResponse::Ok().json(item),
        Err(err) => service_error_response(&err, "failed to decrement item stock"),
    }
}
