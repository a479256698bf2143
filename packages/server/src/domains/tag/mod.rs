//! Tag domain - labels shared by destinations and packages

pub mod activities;
pub mod data;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use data::{CreateTagInput, TagData, UpdateTagInput};
pub use models::{Tag, TagWithOwner};
pub use routes::router;
