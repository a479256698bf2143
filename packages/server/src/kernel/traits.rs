// Trait definitions for dependency injection
//
// Infrastructure seams only. Naming convention: Base* for trait names.

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

// =============================================================================
// Upload storage (signed direct-to-bucket uploads)
// =============================================================================

#[async_trait]
pub trait BaseUploadStorage: Send + Sync {
    /// Signed URL the browser can PUT the file body to.
    async fn presign_put(&self, key: &str, content_type: &str, expires_in: Duration)
        -> Result<String>;

    /// URL the stored object is served from once uploaded.
    fn public_url(&self, key: &str) -> String;

    /// Lifetime of signed upload URLs.
    fn upload_ttl(&self) -> Duration;
}
