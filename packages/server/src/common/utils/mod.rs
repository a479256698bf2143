pub mod images;
pub mod slug;

pub use images::*;
pub use slug::*;
