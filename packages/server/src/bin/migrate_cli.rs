//! CLI for schema migrations
//!
//! Outputs JSON so deploy scripts can parse the result.

use agency_core::config::Config;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use sqlx::migrate::Migrator;
use sqlx::PgPool;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Parser)]
#[command(name = "migrate_cli")]
#[command(about = "Schema migration CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending migrations
    Run,

    /// List migrations and whether each one is applied
    Status,
}

// ============================================================================
// JSON Response Types
// ============================================================================

#[derive(Serialize)]
struct Response {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    migrations: Option<Vec<MigrationInfo>>,
}

#[derive(Serialize)]
struct MigrationInfo {
    version: i64,
    description: String,
    applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    installed_on: Option<DateTime<Utc>>,
}

#[derive(sqlx::FromRow)]
struct AppliedRow {
    version: i64,
    installed_on: DateTime<Utc>,
}

fn output(resp: &Response) -> Result<()> {
    println!("{}", serde_json::to_string(resp)?);
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run => cmd_run().await,
        Commands::Status => cmd_status().await,
    }
}

async fn get_pool() -> Result<PgPool> {
    let database_url = Config::database_url_from_env()?;
    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

// ============================================================================
// Commands
// ============================================================================

async fn cmd_run() -> Result<()> {
    let pool = get_pool().await?;
    let before = applied(&pool).await?.len();

    if let Err(e) = MIGRATOR.run(&pool).await {
        return output(&Response {
            success: false,
            message: Some(format!("Migration failed: {}", e)),
            migrations: None,
        });
    }

    let after = applied(&pool).await?.len();
    output(&Response {
        success: true,
        message: Some(format!("Applied {} migration(s)", after.saturating_sub(before))),
        migrations: None,
    })
}

async fn cmd_status() -> Result<()> {
    let pool = get_pool().await?;
    let applied = applied(&pool).await?;

    let migrations = MIGRATOR
        .iter()
        .map(|m| {
            let row = applied.iter().find(|r| r.version == m.version);
            MigrationInfo {
                version: m.version,
                description: m.description.to_string(),
                applied: row.is_some(),
                installed_on: row.map(|r| r.installed_on),
            }
        })
        .collect();

    output(&Response {
        success: true,
        message: None,
        migrations: Some(migrations),
    })
}

/// Successful rows of `_sqlx_migrations`; empty before the first run.
async fn applied(pool: &PgPool) -> Result<Vec<AppliedRow>> {
    let exists: bool = sqlx::query_scalar("SELECT to_regclass('_sqlx_migrations') IS NOT NULL")
        .fetch_one(pool)
        .await?;
    if !exists {
        return Ok(Vec::new());
    }

    sqlx::query_as::<_, AppliedRow>(
        "SELECT version, installed_on FROM _sqlx_migrations WHERE success ORDER BY version",
    )
    .fetch_all(pool)
    .await
    .context("Failed to read applied migrations")
}
