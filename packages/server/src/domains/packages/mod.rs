//! Packages domain - sellable trips, optionally tied to a destination

pub mod activities;
pub mod data;
pub mod models;
pub mod routes;

pub use data::PackageData;
pub use models::{CreatePackage, Package, PackageFilter, UpdatePackage};
pub use routes::router;
