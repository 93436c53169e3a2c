use actix_web::{HttpResponse, Responder, get, post, web};

use crate::auth::SelectedStore;
use crate::domain::auth::CurrentUser;
use crate::forms::sales::CreateSaleForm;
use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::sales::{self as sale_service, SalesQuery};

#[get("/sales")]
pub async fn list_sales(
    query: web::Query<SalesQuery>,
    user: CurrentUser,
    store: SelectedStore,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match sale_service::list_sales(repo.get_ref(), &user, store.0, query.into_inner()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => service_error_response(&err, "failed to list sales"),
    }
}

#[post("/sales")]
pub async fn create_sale(
    user: CurrentUser,
    store: SelectedStore,
    repo: web::Data<DieselRepository>,
    form: web::Json<CreateSaleForm>,
) -> impl Responder {
    match sale_service::create_sale(repo.get_ref(), &user, store.0, form.into_inner()) {
        Ok(sale) => HttpResponse::Created().json(sale),
        Err(err) => service_error_response(&err, "failed to create sale"),
    }
}
