use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::auth::SelectedStore;
use crate::domain::auth::CurrentUser;
use crate::forms::products::{CopyProductsForm, ProductForm};
use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::products as product_service;

#[get("/products")]
pub async fn list_products(
    user: CurrentUser,
    store: SelectedStore,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match product_service::list_products(repo.get_ref(), &user, store.0) {
        Ok((total, products)) => {
            HttpResponse::Ok().json(serde_json::json!({ "total": total, "products": products }))
        }
        Err(err) => service_error_response(&err, "failed to list products"),
    }
}

#[post("/products")]
pub async fn create_product(
    user: CurrentUser,
    store: SelectedStore,
    repo: web::Data<DieselRepository>,
    form: web::Json<ProductForm>,
) -> impl Responder {
    match product_service::create_product(repo.get_ref(), &user, store.0, form.into_inner()) {
        Ok(product) => HttpResponse::Created().json(product),
        Err(err) => service_error_response(&err, "failed to create product"),
    }
}

#[post("/products/copy")]
pub async fn copy_products(
    user: CurrentUser,
    store: SelectedStore,
    repo: web::Data<DieselRepository>,
    form: web::Json<CopyProductsForm>,
) -> impl Responder {
    match product_service::copy_products(repo.get_ref(), &user, store.0, form.into_inner()) {
        Ok(copied) => HttpResponse::Ok().json(serde_json::json!({ "copied": copied })),
        Err(err) => service_error_response(&err, "failed to copy products"),
    }
}

#[get("/products/{product_id}")]
pub async fn get_product(
    path: web::Path<i32>,
    user: CurrentUser,
    store: SelectedStore,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match product_service::get_product(repo.get_ref(), &user, store.0, path.into_inner()) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => service_error_response(&err, "failed to fetch product"),
    }
}

#[put("/products/{product_id}")]
pub async fn update_product(
    path: web::Path<i32>,
    user: CurrentUser,
    store: SelectedStore,
    repo: web::Data<DieselRepository>,
    form: web::Json<ProductForm>,
) -> impl Responder {
    match product_service::update_product(
        repo.get_ref(),
        &user,
        store.0,
        path.into_inner(),
        form.into_inner(),
    ) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => service_error_response(&err, "failed to update product"),
    }
}

#[delete("/products/{product_id}")]
pub async fn delete_product(
    path: web::Path<i32>,
    user: CurrentUser,
    store: SelectedStore,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    match product_service::delete_product(repo.get_ref(), &user, store.0, product_id) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "message": "product deleted" })),
        Err(err) => service_error_response(&err, "failed to delete product"),
    }
}
