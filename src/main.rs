mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{http::header, middleware::{Condition, Logger}, web, App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::services::{PaymentProvider, StripeClient, TokenService};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env()?;

    log::info!("🚀 Starting HealthBridge service...");
    log::info!("🗄️  Database: {}", config.database.name);
    if config.auth.protect_writes {
        log::info!("🔒 Write routes require a valid token cookie");
    }

    // The single database handle for the whole process
    let db = database::MongoDB::connect(&config.database)
        .await
        .context("Failed to connect to MongoDB")?;
    log::info!("✅ MongoDB connected successfully");

    let db_data = web::Data::new(db.clone());
    let tokens = web::Data::new(TokenService::from_config(&config.auth));
    let payments: Arc<dyn PaymentProvider> = Arc::new(StripeClient::new(&config.payment)?);
    let payments = web::Data::from(payments);

    let origins = config.server.cors_allowed_origins.clone();
    let protect_writes = config.auth.protect_writes;
    let bind = (config.server.host.clone(), config.server.port);

    log::info!("🌐 Server starting on {}:{}", bind.0, bind.1);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", bind.0, bind.1);

    HttpServer::new(move || {
        let cors = origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .app_data(db_data.clone())
            .app_data(tokens.clone())
            .app_data(payments.clone())
            .wrap(Condition::new(protect_writes, middleware::TokenGuard::writes()))
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", api::swagger::ApiDoc::openapi()),
            )
            .configure(api::configure)
    })
    .bind(bind)?
    .run()
    .await?;

    // run() returns after SIGINT/SIGTERM once in-flight requests have drained
    db.shutdown().await;
    log::info!("👋 Server stopped");

    Ok(())
}
