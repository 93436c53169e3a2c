use actix_web::{
    HttpRequest, HttpResponse, Responder, ResponseError, delete, get, post, put, web,
};

use crate::auth::provider::IdentityProvider;
use crate::auth::{AuthError, SelectedStore, resolve_current_user, selected_store_id};
use crate::config::ServerConfig;
use crate::domain::auth::CurrentUser;
use crate::forms::categories::CategoryForm;
use crate::repository::DieselRepository;
use crate::routes::{ScopeQuery, service_error_response};
use crate::services::categories as category_service;

#[get("/categories")]
pub async fn list_categories(
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

        category_service::list_categories_admin(repo.get_ref(), &user, store_id)
    } else {
        category_service::list_categories_public(repo.get_ref(), &config.default_store_slug)
    };

    match result {
        Ok((total, categories)) => {
            HttpResponse::Ok().json(serde_json::json!({ "total": total, "categories": categories }))
        }
        Err(err) => service_error_response(&err, "failed to list categories"),
    }
}

#[post("/categories")]
pub async fn create_category(
    user: CurrentUser,
    store: SelectedStore,
    repo: web::Data<DieselRepository>,
    form: web::Json<CategoryForm>,
) -> impl Responder {
    match category_service::create_category(repo.get_ref(), &user, store.0, form.into_inner()) {
        Ok(category) => HttpResponse::Created().json(category),
        Err(err) => service_error_response(&err, "failed to create category"),
    }
}

#[put("/categories/{category_id}")]
pub async fn update_category(
    path: web::Path<i32>,
    user: CurrentUser,
    store: SelectedStore,
    repo: web::Data<DieselRepository>,
    form: web::Json<CategoryForm>,
) -> impl Responder {
    match category_service::update_category(
        repo.get_ref(),
        &user,
        store.0,
        path.into_inner(),
        form.into_inner(),
    ) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(err) => service_error_response(&err, "failed to update category"),
    }
}

#[delete("/categories/{category_id}")]
pub async fn delete_category(
    path: web::Path<i32>,
    user: CurrentUser,
    store: SelectedStore,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category_id = path.into_inner();

    match category_service::delete_category(repo.get_ref(), &user, store.0, category_id) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "message": "category deleted" })),
        Err(err) => service_error_response(&err, "failed to delete category"),
    }
}
