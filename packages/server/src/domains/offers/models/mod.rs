pub mod offer;

pub use offer::{CreateOffer, Offer, OfferFilter, UpdateOffer};
