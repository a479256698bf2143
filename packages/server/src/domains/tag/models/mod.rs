pub mod tag;

pub use tag::{group_by_owner, Tag, TagWithOwner};
