// Test doubles for kernel traits

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::BaseUploadStorage;

/// Arguments captured from a presign call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignCall {
    pub key: String,
    pub content_type: String,
}

/// Upload storage that signs nothing and records what it was asked for.
#[derive(Clone, Default)]
pub struct MemoryUploadStorage {
    calls: Arc<Mutex<Vec<PresignCall>>>,
}

impl MemoryUploadStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<PresignCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl BaseUploadStorage for MemoryUploadStorage {
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        _expires_in: Duration,
    ) -> Result<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(PresignCall {
                key: key.to_string(),
                content_type: content_type.to_string(),
            });
        }
        Ok(format!("https://uploads.test/{}?signature=test", key))
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://cdn.test/{}", key)
    }

    fn upload_ttl(&self) -> Duration {
        Duration::from_secs(900)
    }
}
