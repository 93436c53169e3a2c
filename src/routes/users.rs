use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::auth::provider::IdentityProvider;
use crate::domain::auth::CurrentUser;
use crate::forms::users::{CreateUserForm, UpdateUserForm};
use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::users as user_service;

#[get("/users/me")]
pub async fn me(user: CurrentUser) -> impl Responder {
    HttpResponse::Ok().json(user)
}

#[get("/users")]
pub async fn list_users(user: CurrentUser, repo: web::Data<DieselRepository>) -> impl Responder {
    match user_service::list_users(repo.get_ref(), &user) {
        Ok((total, users)) => {
            HttpResponse::Ok().json(serde_json::json!({ "total": total, "users": users }))
        }
        Err(err) => service_error_response(&err, "failed to list users"),
    }
}

#[post("/users")]
pub async fn create_user(
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    provider: web::Data<IdentityProvider>,
    form: web::Json<CreateUserForm>,
) -> impl Responder {
    match user_service::create_user(repo.get_ref(), provider.get_ref(), &user, form.into_inner())
        .await
    {
        Ok(created) => HttpResponse::Created().json(created),
        Err(err) => service_error_response(&err, "failed to create user"),
    }
}

#[get("/users/{user_id}")]
pub async fn get_user(
    path: web::Path<i32>,
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match user_service::get_user(repo.get_ref(), &user, path.into_inner()) {
        Ok(found) => HttpResponse::Ok().json(found),
        Err(err) => service_error_response(&err, "failed to fetch user"),
    }
}

#[put("/users/{user_id}")]
pub async fn update_user(
    path: web::Path<i32>,
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<UpdateUserForm>,
) -> impl Responder {
    match user_service::update_user(repo.get_ref(), &user, path.into_inner(), form.into_inner()) {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(err) => service_error_response(&err, "failed to update user"),
    }
}

#[delete("/users/{user_id}")]
pub async fn delete_user(
    path: web::Path<i32>,
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    provider: web::Data<IdentityProvider>,
) -> impl Responder {
    let user_id = path.into_inner();

    match user_service::delete_user(repo.get_ref(), provider.get_ref(), &user, user_id).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "message": "user deleted" })),
        Err(err) => service_error_response(&err, "failed to delete user"),
    }
}
