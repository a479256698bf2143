//! Events domain - expos, info sessions and group trips with a date

pub mod activities;
pub mod data;
pub mod models;
pub mod routes;

pub use data::EventData;
pub use models::{CreateEvent, Event, EventFilter, UpdateEvent};
pub use routes::router;
