// HTTP routes that do not belong to a content domain
pub mod health;

pub use health::*;
