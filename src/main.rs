use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vetshop::config::Config;
use vetshop::core::TracingNotifier;
use vetshop::middleware::RequestId;
use vetshop::modules::deletions::services::{HttpDeleteGateway, SoftDeleteList};
use vetshop::modules::deletions::controllers::configure_deletion_routes;
use vetshop::modules::health::configure_health_routes;
use vetshop::modules::invoices::controllers::configure_invoice_routes;
use vetshop::modules::taxes::controllers::configure_tax_routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vetshop=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting vetshop checkout service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Upstream gateway: {}", config.gateway.base_url);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let gateway = HttpDeleteGateway::new(
        config.gateway.base_url.clone(),
        Duration::from_secs(config.gateway.delete_timeout_secs),
    )
    .expect("Failed to build gateway client");

    let catalog = SoftDeleteList::new(
        Arc::new(gateway),
        Arc::new(TracingNotifier),
        Duration::from_millis(config.deletion.grace_window_ms),
    );

    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(RequestId)
            .wrap(Cors::permissive())
            .app_data(web::Data::new(catalog.clone()))
            .configure(configure_health_routes)
            .configure(configure_tax_routes)
            .configure(configure_invoice_routes)
            .configure(configure_deletion_routes)
    })
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}
