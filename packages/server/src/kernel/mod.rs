//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod storage;
pub mod test_dependencies;
pub mod traits;

pub use deps::{ServerDeps, SiteSettings};
pub use storage::S3UploadStorage;
pub use test_dependencies::MemoryUploadStorage;
pub use traits::*;
