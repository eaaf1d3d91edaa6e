// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config and providers, then start the HTTP server

mod config;
mod errors;
mod handlers;
mod middleware;
mod models;
mod services;

use actix_web::{middleware::Logger, web, App, HttpServer};
use config::Config;
use dotenv::dotenv;
use middleware::CorsPolicy;
use services::{
    AppRecommender, NaverClient, NaverRelay, RecommendationService, RegionTable, TextProvider,
    ThreadRandom,
};
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            config.log_level.clone()
        } else {
            "info,actix_web=info".to_string()
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    log::info!("Starting lunch-hunt relay...");
    log::info!("Environment: {}", config.environment);
    log::info!("Relay mode: {:?}", config.relay_mode());
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Region table shared by every geocoding caller
    let regions = match &config.region_table_path {
        Some(path) => match RegionTable::load(path) {
            Ok(table) => table,
            Err(e) => {
                log::warn!("{}; using the built-in region table", e);
                RegionTable::builtin()
            }
        },
        None => RegionTable::builtin(),
    };
    let regions = Arc::new(regions);

    // 5. Providers, selected once
    let recommender: web::Data<AppRecommender> = web::Data::new(RecommendationService::new(
        NaverClient::from_config(&config, regions),
        TextProvider::from_config(&config),
        ThreadRandom,
    ));
    let relay = web::Data::new(NaverRelay::from_config(&config));
    let cors_policy = CorsPolicy::from_config(&config);
    log::info!("CORS policy: {:?}", cors_policy);

    // 6. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let app_config = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            // Application state
            .app_data(app_config.clone())
            .app_data(recommender.clone())
            .app_data(relay.clone())
            // Middleware
            .wrap(cors_policy.build())
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::relay_config)
            .configure(handlers::recommendations_config::<NaverClient, TextProvider, ThreadRandom>)
            .default_service(web::route().to(handlers::not_found))
    })
    .bind(&server_addr)?
    .run()
    .await
}
