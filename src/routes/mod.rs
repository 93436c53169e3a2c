use actix_web::HttpResponse;
use serde::Deserialize;

use crate::services::ServiceError;

pub mod auth;
pub mod categories;
pub mod items;
pub mod products;
pub mod sales;
pub mod store_status;
pub mod stores;
pub mod users;

/// Query flag shared by endpoints serving both the admin panel and the
/// public storefront.
#[derive(Debug, Default, Deserialize)]
pub struct ScopeQuery {
    #[serde(default)]
    pub admin: bool,
}

pub(crate) fn error_body(message: &str) -> serde_json::Value {
    serde_json::json!({ "error": message })
}

/// Map a service error onto its HTTP response. Unexpected errors are logged
/// with `context` and returned opaque.
pub(crate) fn service_error_response(err: &ServiceError, context: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            HttpResponse::Unauthorized().json(error_body("authentication required"))
        }
        ServiceError::Forbidden => {
            HttpResponse::Forbidden().json(error_body("insufficient permissions"))
        }
        ServiceError::NotFound => HttpResponse::NotFound().json(error_body("not found")),
        ServiceError::Form(message) => HttpResponse::BadRequest().json(error_body(message)),
        ServiceError::Conflict => HttpResponse::Conflict().json(error_body("already exists")),
        other => {
            log::error!("{context}: {other}");
            HttpResponse::InternalServerError().json(error_body("internal server error"))
        }
    }
}
