use tracing::info;
use uuid::Uuid;

use crate::common::Validate;
use crate::domains::uploads::data::{UploadRequest, UploadTicket};
use crate::kernel::ServerDeps;
use crate::server::{ApiError, ApiResult};

/// Presign a direct-to-bucket upload for an image or PDF.
pub async fn request_upload(request: UploadRequest, deps: &ServerDeps) -> ApiResult<UploadTicket> {
    request.validate()?;

    let storage = deps
        .storage
        .as_ref()
        .ok_or_else(|| ApiError::Unavailable("Upload storage is not configured".to_string()))?;

    let key = request.object_key(Uuid::now_v7());
    let content_type = request.content_type.trim().to_ascii_lowercase();
    let ttl = storage.upload_ttl();
    let upload_url = storage.presign_put(&key, &content_type, ttl).await?;

    info!(key = %key, content_type = %content_type, "Upload URL issued");

    Ok(UploadTicket {
        public_url: storage.public_url(&key),
        key,
        upload_url,
        expires_in_secs: ttl.as_secs(),
    })
}
