//! Offers domain - time-boxed promotions

pub mod activities;
pub mod data;
pub mod models;
pub mod routes;

pub use data::OfferData;
pub use models::{CreateOffer, Offer, OfferFilter, UpdateOffer};
pub use routes::router;
