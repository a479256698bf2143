// HTTP server setup (Axum + JSON API)
pub mod app;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;

pub use app::*;
pub use error::{ApiError, ApiResult};
pub use extract::{AdminUser, Visibility, VisibilityQuery};
