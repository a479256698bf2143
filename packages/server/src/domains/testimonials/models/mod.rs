pub mod testimonial;

pub use testimonial::{CreateTestimonial, Testimonial, TestimonialFilter, UpdateTestimonial};
