// Content domains
pub mod auth;
pub mod blog;
pub mod departments;
pub mod destinations;
pub mod events;
pub mod fixed_departures;
pub mod home;
pub mod offers;
pub mod packages;
pub mod tag;
pub mod testimonials;
pub mod uploads;
pub mod whatsapp;
