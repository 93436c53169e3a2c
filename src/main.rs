use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use resto_admin::auth::provider::IdentityProvider;
use resto_admin::config::ServerConfig;
use resto_admin::db::establish_connection_pool;
use resto_admin::middleware::SessionRenewal;
use resto_admin::repository::DieselRepository;
use resto_admin::routes::auth::{login, logout, refresh};
use resto_admin::routes::categories::{
    create_category, delete_category, list_categories, update_category,
};
use resto_admin::routes::items::{
    create_item, decrement_item, delete_item, get_item, list_items, update_item,
};
use resto_admin::routes::products::{
    copy_products, create_product, delete_product, get_product, list_products, update_product,
};
use resto_admin::routes::sales::{create_sale, list_sales};
use resto_admin::routes::store_status::{get_store_status, update_store_status};
use resto_admin::routes::stores::{
    accessible_stores, create_store, delete_store, get_store, list_stores, select_store,
    update_store,
};
use resto_admin::routes::users::{
    create_user, delete_user, get_user, list_users, me, update_user,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);
    let provider = IdentityProvider::new(config.identity.clone());

    let bind_address = (config.address.clone(), config.port);
    let secure_cookies = config.secure_cookies;

    HttpServer::new(move || {
        App::new()
            .wrap(SessionRenewal::new(secure_cookies))
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(
                web::scope("/api")
                    .service(login)
                    .service(logout)
                    .service(refresh)
                    .service(list_categories)
                    .service(create_category)
                    .service(update_category)
                    .service(delete_category)
                    .service(list_items)
                    .service(create_item)
                    .service(get_item)
                    .service(update_item)
                    .service(delete_item)
                    .service(decrement_item)
                    .service(list_products)
                    .service(create_product)
                    .service(copy_products)
                    .service(get_product)
                    .service(update_product)
                    .service(delete_product)
                    .service(list_sales)
                    .service(create_sale)
                    .service(get_store_status)
                    .service(update_store_status)
                    .service(list_stores)
                    .service(create_store)
                    .service(accessible_stores)
                    .service(select_store)
                    .service(get_store)
                    .service(update_store)
                    .service(delete_store)
                    .service(me)
                    .service(list_users)
                    .service(create_user)
                    .service(get_user)
                    .service(update_user)
                    .service(delete_user),
            )
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(provider.clone()))
            .app_data(web::Data::new(config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
