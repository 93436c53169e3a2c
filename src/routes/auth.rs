use actix_web::{HttpRequest, HttpResponse, Responder, post, web};

use crate::auth::provider::IdentityProvider;
use crate::auth::{
    ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, access_cookie, expired_cookie, refresh_cookie,
};
use crate::config::ServerConfig;
use crate::forms::auth::LoginForm;
use crate::repository::DieselRepository;
use crate::routes::{error_body, service_error_response};
use crate::services::{ServiceError, auth as auth_service};

#[post("/auth/login")]
pub async fn login(
    repo: web::Data<DieselRepository>,
    provider: web::Data<IdentityProvider>,
    config: web::Data<ServerConfig>,
    form: web::Json<LoginForm>,
) -> impl Responder {
    match auth_service::login(repo.get_ref(), provider.get_ref(), form.into_inner()).await {
        Ok(data) => HttpResponse::Ok()
            .cookie(access_cookie(
                &data.session.access_token,
                config.secure_cookies,
            ))
            .cookie(refresh_cookie(
                &data.session.refresh_token,
                config.secure_cookies,
            ))
            .json(data),
        Err(ServiceError::Unauthorized) => {
            HttpResponse::Unauthorized().json(error_body("invalid credentials"))
        }
        Err(err) => service_error_response(&err, "login failed"),
    }
}

#[post("/auth/logout")]
pub async fn logout(provider: web::Data<IdentityProvider>, req: HttpRequest) -> impl Responder {
    let access_token = req
        .cookie(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string());

    auth_service::logout(provider.get_ref(), access_token.as_deref()).await;

    HttpResponse::Ok()
        .cookie(expired_cookie(ACCESS_TOKEN_COOKIE))
        .cookie(expired_cookie(REFRESH_TOKEN_COOKIE))
        .json(serde_json::json!({ "message": "signed out" }))
}

#[post("/auth/refresh")]
pub async fn refresh(
    repo: web::Data<DieselRepository>,
    provider: web::Data<IdentityProvider>,
    config: web::Data<ServerConfig>,
    req: HttpRequest,
) -> impl Responder {
    let Some(refresh_token) = req.cookie(REFRESH_TOKEN_COOKIE) else {
        return HttpResponse::Unauthorized().json(error_body("authentication required"));
    };

    match auth_service::refresh(repo.get_ref(), provider.get_ref(), refresh_token.value()).await {
        Ok(data) => HttpResponse::Ok()
            .cookie(access_cookie(
                &data.session.access_token,
                config.secure_cookies,
            ))
            .cookie(refresh_cookie(
                &data.session.refresh_token,
                config.secure_cookies,
            ))
            .json(data),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized()
            .cookie(expired_cookie(ACCESS_TOKEN_COOKIE))
            .cookie(expired_cookie(REFRESH_TOKEN_COOKIE))
            .json(error_body("session expired")),
        Err(err) => service_error_response(&err, "session refresh failed"),
    }
}
