//! Destinations domain - places the agency sells trips to

pub mod activities;
pub mod data;
pub mod models;
pub mod routes;

pub use data::DestinationData;
pub use models::{CreateDestination, Destination, DestinationFilter, UpdateDestination};
pub use routes::router;
