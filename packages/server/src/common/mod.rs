// Common types and utilities shared across domains

pub mod auth;
pub mod entity_ids;
pub mod id;
pub mod pagination;
pub mod utils;
pub mod validation;

pub use auth::AuthError;
pub use entity_ids::*;
pub use id::Id;
pub use pagination::PageParams;
pub use validation::{Validate, ValidationErrors};
