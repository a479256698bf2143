//! Home domain - landing page aggregate

pub mod activities;
pub mod routes;

pub use activities::HomeData;
pub use routes::router;
