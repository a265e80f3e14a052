mod cors;
mod cron;
mod routes;

use actix_web::{
    App, HttpServer,
    web::{self},
};
use common::env_config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();

    // get info
    let is_production = config.is_production();
    let origin = config.cors_allowed_origin.clone();

    // init logger
    if config.console_logging_enabled {
        logger::setup().expect("Failed to set up logger");
    }

    // init db connection
    let pool = db::setup(&config.database_url, is_production)
        .await
        .expect("Failed to set up database");

    // keep the top tokens table fresh
    cron::spawn_top_tokens_refresh(pool.clone(), config.clone());

    log::info!(
        "Server listening on {}:{}",
        config.server_host,
        config.server_port
    );

    HttpServer::new(move || {
        let secret = config_data.session_secret.as_bytes();
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config_data.clone()))
            .app_data(routes::json_config())
            .app_data(routes::path_config())
            .app_data(routes::query_config())
            .wrap(logger::middleware(config_data.console_logging_enabled)) // 3rd
            .wrap(cors::middleware(&origin)) // 2nd
            .wrap(api_users::session_middleware(is_production, secret)) // 1st
            .service(routes::index)
            .service(
                web::scope("/api")
                    .service(api_users::mount_users())
                    .service(api_wallets::mount_wallets())
                    .service(api_subscribers::mount_subscribers())
                    .service(api_ieo::mount_ieo())
                    .service(api_p2p::mount_p2p()),
            )
            .default_service(web::to(routes::not_found))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
