// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, wait for the database, and start HTTP server

mod config;
mod db;
mod errors;
mod handlers;
mod models;

use actix_web::{middleware::Logger, web, App, HttpServer};
use config::Config;
use db::MovieRepository;
use dotenv::dotenv;
use std::io;
use std::time::Duration;

/// Deadline for receiving a full request head
const CLIENT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = config
            .as_ref()
            .map(|c| c.log_level.clone())
            .unwrap_or_else(|_| config::env::DEFAULT_LOG_LEVEL.to_string());
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            log::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("Starting movies-api...");
    log::info!("Server Address: {}", config.bind_address());

    // 4. Initialize database connection pool and hold until it answers
    let pool = config::init_db_pool(&config);
    match config.db_wait_timeout {
        Some(limit) => log::info!("Waiting up to {:?} for the database", limit),
        None => log::info!("Waiting for the database (no deadline)"),
    }
    let options = config::db::connect_options(&config);
    if let Err(e) = config::wait_for_db(&options, config.db_wait_timeout).await {
        log::error!("{}", e);
        std::process::exit(1);
    }

    // 5. Optional schema bootstrap
    if config.db_init_schema {
        if let Err(e) = db::ensure_schema(&pool).await {
            log::error!("Failed to initialize schema: {}", e);
            std::process::exit(1);
        }
    }

    // 6. Start HTTP server
    let store = web::Data::new(MovieRepository::new(pool));
    log::info!("Starting the Server...");

    HttpServer::new(move || {
        App::new()
            // Application state (movie store over the shared pool)
            .app_data(store.clone())
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::movies_config::<MovieRepository>)
    })
    .client_request_timeout(CLIENT_REQUEST_TIMEOUT)
    .bind(config.bind_address())?
    .run()
    .await
}
