//! Blog domain - travel articles

pub mod activities;
pub mod data;
pub mod models;
pub mod routes;

pub use data::{BlogPostData, BlogPostSummary};
pub use models::BlogPost;
pub use routes::router;
