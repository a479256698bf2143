//! Uploads domain - signed upload URLs for images and PDFs

pub mod activities;
pub mod data;
pub mod routes;

pub use routes::router;
