//! WhatsApp domain - message templates and `wa.me` contact links

pub mod activities;
pub mod data;
pub mod link;
pub mod models;
pub mod routes;
pub mod template;

pub use link::{build_wa_link, normalize_phone, tracking_url, LinkError};
pub use models::{TemplateCategory, WhatsAppTemplate};
pub use routes::router;
pub use template::{substitute, MissingVariable, TemplateVars};
