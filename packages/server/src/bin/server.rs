// Main entry point for the content API server

use std::sync::Arc;

use agency_core::domains::auth::JwtService;
use agency_core::kernel::{BaseUploadStorage, S3UploadStorage, ServerDeps, SiteSettings};
use agency_core::server::{build_app, HttpOptions};
use agency_core::Config;
use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,agency_core=debug,sqlx=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting agency content API");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    let storage: Option<Arc<dyn BaseUploadStorage>> = match &config.storage {
        Some(storage_config) => {
            tracing::info!(bucket = %storage_config.bucket, "Upload storage configured");
            Some(Arc::new(S3UploadStorage::from_config(storage_config).await))
        }
        None => {
            tracing::warn!("STORAGE_BUCKET not set, uploads are disabled");
            None
        }
    };

    if config.whatsapp_phone.trim().is_empty() {
        tracing::warn!("WHATSAPP_PHONE not set, WhatsApp links need an explicit phone");
    }

    let jwt_service = Arc::new(JwtService::new(&config.jwt_secret, config.jwt_issuer.clone()));
    let deps = ServerDeps::new(pool, jwt_service, storage, SiteSettings::from_config(&config));
    let app = build_app(deps, &HttpOptions::from_config(&config));

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
