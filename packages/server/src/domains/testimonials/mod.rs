//! Testimonials domain - traveller reviews shown on the home page

pub mod activities;
pub mod data;
pub mod models;
pub mod routes;

pub use data::TestimonialData;
pub use models::Testimonial;
pub use routes::router;
