use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::auth::store_cookie;
use crate::config::ServerConfig;
use crate::domain::auth::CurrentUser;
use crate::forms::stores::{SaveStoreForm, SelectStoreForm};
use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::stores as store_service;

#[get("/stores")]
pub async fn list_stores(
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match store_service::list_stores(repo.get_ref(), &user) {
        Ok((total, stores)) => {
            HttpResponse::Ok().json(serde_json::json!({ "total": total, "stores": stores }))
        }
        Err(err) => service_error_response(&err, "failed to list stores"),
    }
}

#[post("/stores")]
pub async fn create_store(
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<SaveStoreForm>,
) -> impl Responder {
    match store_service::create_store(repo.get_ref(), &user, form.into_inner()) {
        Ok(store) => HttpResponse::Created().json(store),
        Err(err) => service_error_response(&err, "failed to create store"),
    }
}

#[get("/stores/accessible")]
pub async fn accessible_stores(
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match store_service::accessible_stores(repo.get_ref(), &user) {
        Ok(stores) => HttpResponse::Ok().json(serde_json::json!({ "stores": stores })),
        Err(err) => service_error_response(&err, "failed to list accessible stores"),
    }
}

#[post("/stores/select")]
pub async fn select_store(
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    form: web::Json<SelectStoreForm>,
) -> impl Responder {
    match store_service::select_store(repo.get_ref(), &user, form.into_inner()) {
        Ok(store) => HttpResponse::Ok()
            .cookie(store_cookie(store.id, config.secure_cookies))
            .json(store),
        Err(err) => service_error_response(&err, "failed to select store"),
    }
}

#[get("/stores/{store_id}")]
pub async fn get_store(
    path: web::Path<i32>,
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match store_service::get_store(repo.get_ref(), &user, path.into_inner()) {
        Ok(store) => HttpResponse::Ok().json(store),
        Err(err) => service_error_response(&err, "failed to fetch store"),
    }
}

#[put("/stores/{store_id}")]
pub async fn update_store(
    path: web::Path<i32>,
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<SaveStoreForm>,
) -> impl Responder {
    match store_service::update_store(repo.get_ref(), &user, path.into_inner(), form.into_inner())
    {
        Ok(store) => HttpResponse::Ok().json(store),
        Err(err) => service_error_response(&err, "failed to update store"),
    }
}

#[delete("/stores/{store_id}")]
pub async fn delete_store(
    path: web::Path<i32>,
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let store_id = path.into_inner();

    match store_service::delete_store(repo.get_ref(), &user, store_id) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "message": "store deleted" })),
        Err(err) => service_error_response(&err, "failed to delete store"),
    }
}
