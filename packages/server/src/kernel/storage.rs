//! S3-compatible upload storage.
//!
//! Works against AWS S3 or any S3-compatible endpoint (R2, MinIO, Supabase
//! storage) when `STORAGE_ENDPOINT` is set; path-style addressing is forced
//! for custom endpoints.

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client as S3Client;
use std::time::Duration;
use tracing::debug;

use crate::config::StorageConfig;
use crate::kernel::BaseUploadStorage;

pub struct S3UploadStorage {
    client: S3Client,
    bucket: String,
    public_base_url: String,
    ttl: Duration,
}

impl S3UploadStorage {
    /// Build a client from the ambient AWS credential chain plus storage config.
    pub async fn from_config(config: &StorageConfig) -> Self {
        let shared = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let mut builder =
            aws_sdk_s3::config::Builder::from(&shared).region(Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self {
            client: S3Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
            public_base_url: config.public_base_url.clone(),
            ttl: Duration::from_secs(config.upload_url_ttl_secs),
        }
    }
}

#[async_trait]
impl BaseUploadStorage for S3UploadStorage {
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String> {
        let presigning =
            PresigningConfig::expires_in(expires_in).context("Invalid upload URL lifetime")?;

        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigning)
            .await
            .context("Failed to presign upload")?;

        debug!(bucket = %self.bucket, key = %key, "Presigned upload URL");

        Ok(request.uri().to_string())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), key)
    }

    fn upload_ttl(&self) -> Duration {
        self.ttl
    }
}
