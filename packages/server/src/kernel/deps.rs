//! Server dependencies shared by every handler
//!
//! External services sit behind traits (see `traits.rs`) so tests can swap
//! them for in-memory doubles.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::Config;
use crate::domains::auth::JwtService;
use crate::kernel::BaseUploadStorage;

/// Site-wide values used when shaping responses and contact links
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub site_url: String,
    pub whatsapp_phone: String,
    pub fallback_image_url: String,
}

impl SiteSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            site_url: config.site_url.clone(),
            whatsapp_phone: config.whatsapp_phone.clone(),
            fallback_image_url: config.fallback_image_url.clone(),
        }
    }
}

#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub jwt_service: Arc<JwtService>,
    /// None when object storage is not configured; uploads then answer 503.
    pub storage: Option<Arc<dyn BaseUploadStorage>>,
    pub site: SiteSettings,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        jwt_service: Arc<JwtService>,
        storage: Option<Arc<dyn BaseUploadStorage>>,
        site: SiteSettings,
    ) -> Self {
        Self {
            db_pool,
            jwt_service,
            storage,
            site,
        }
    }

    /// Fallback image URL for display payloads.
    pub fn fallback_image(&self) -> &str {
        &self.site.fallback_image_url
    }
}
