use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use crate::common::utils::DEFAULT_FALLBACK_IMAGE_URL;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub allowed_origins: Vec<String>,
    /// Public site base URL, used to build tracking links for WhatsApp messages
    pub site_url: String,
    /// Agency WhatsApp number in any human format; digits are extracted when linking
    pub whatsapp_phone: String,
    pub fallback_image_url: String,
    pub storage: Option<StorageConfig>,
    pub rate_limit_enabled: bool,
}

/// S3-compatible object storage used for signed uploads
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    pub endpoint: Option<String>,
    pub public_base_url: String,
    pub upload_url_ttl_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "agency-cms".to_string()),
            allowed_origins: parse_list(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
            site_url: env::var("SITE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            whatsapp_phone: env::var("WHATSAPP_PHONE").unwrap_or_default(),
            fallback_image_url: env::var("FALLBACK_IMAGE_URL")
                .unwrap_or_else(|_| DEFAULT_FALLBACK_IMAGE_URL.to_string()),
            storage: StorageConfig::from_env()?,
            rate_limit_enabled: env::var("RATE_LIMIT_ENABLED")
                .unwrap_or_else(|_| "true".to_string())
                .parse::<bool>()
                .unwrap_or(true),
        })
    }

    /// Database-only configuration for the CLI binaries (seed, migrate_cli)
    pub fn database_url_from_env() -> Result<String> {
        let _ = dotenv();
        env::var("DATABASE_URL").context("DATABASE_URL must be set")
    }
}

impl StorageConfig {
    /// Storage is optional: without STORAGE_BUCKET the upload endpoint is disabled.
    fn from_env() -> Result<Option<Self>> {
        let bucket = match env::var("STORAGE_BUCKET") {
            Ok(bucket) if !bucket.trim().is_empty() => bucket,
            _ => return Ok(None),
        };

        let region = env::var("STORAGE_REGION").unwrap_or_else(|_| "us-east-1".to_string());
        let endpoint = env::var("STORAGE_ENDPOINT").ok().filter(|s| !s.is_empty());
        let public_base_url = env::var("STORAGE_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("https://{}.s3.{}.amazonaws.com", bucket, region));

        Ok(Some(Self {
            bucket,
            region,
            endpoint,
            public_base_url,
            upload_url_ttl_secs: env::var("UPLOAD_URL_TTL_SECS")
                .unwrap_or_else(|_| "900".to_string())
                .parse()
                .context("UPLOAD_URL_TTL_SECS must be a valid number")?,
        }))
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_list_trims_and_drops_empty_entries() {
        assert_eq!(
            parse_list(" https://a.example , ,https://b.example,"),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert!(parse_list("").is_empty());
    }
}
