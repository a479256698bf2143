//! Fixed departures domain - dated group departures of a package

pub mod activities;
pub mod data;
pub mod models;
pub mod routes;

pub use data::FixedDepartureData;
pub use models::{DepartureStatus, FixedDeparture};
pub use routes::router;
