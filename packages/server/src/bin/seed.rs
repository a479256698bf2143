//! Populate baseline content (tags, destinations, packages, offers,
//! WhatsApp templates, departments, testimonials). Safe to run repeatedly.

use agency_core::config::Config;
use agency_core::seed::{run_seed, SeedData};
use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,agency_core=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = Config::database_url_from_env()?;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let data = SeedData::baseline()?;
    let report = run_seed(&pool, &data).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
