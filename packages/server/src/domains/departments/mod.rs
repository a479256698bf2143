//! Departments domain - themed sections (weddings, quinceañera) and their
//! venue destinations

pub mod activities;
pub mod data;
pub mod models;
pub mod routes;

pub use data::{DepartmentData, DepartmentDestinationData, DepartmentPageData};
pub use models::{Department, DepartmentDestination, DepartmentKind};
pub use routes::router;
