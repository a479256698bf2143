use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::common::utils::resolve_image_url;
use crate::common::{TestimonialId, Validate, ValidationErrors};
use crate::domains::testimonials::models::{CreateTestimonial, Testimonial, UpdateTestimonial};

#[derive(Debug, Clone, Serialize)]
pub struct TestimonialData {
    pub id: TestimonialId,
    pub author_name: String,
    pub location: Option<String>,
    pub body: String,
    pub rating: i32,
    pub image_url: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

impl TestimonialData {
    pub fn from_model(testimonial: Testimonial, fallback_image: &str) -> Self {
        Self {
            image_url: resolve_image_url(testimonial.image_url.as_deref(), fallback_image),
            id: testimonial.id,
            author_name: testimonial.author_name,
            location: testimonial.location,
            body: testimonial.body,
            rating: testimonial.rating,
            published: testimonial.published,
            created_at: testimonial.created_at,
        }
    }
}

impl Validate for CreateTestimonial {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("author_name", &self.author_name);
        errors.require_text("body", &self.body);
        errors.check_range("rating", self.rating, 1, 5);
        errors.check_url("image_url", self.image_url.as_deref());
        errors.into_result()
    }
}

impl Validate for UpdateTestimonial {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.reject_blank("author_name", self.author_name.as_deref());
        errors.reject_blank("body", self.body.as_deref());
        errors.check_range("rating", self.rating, 1, 5);
        errors.check_url("image_url", self.image_url.as_deref());
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_outside_one_to_five_is_rejected() {
        for rating in [0, 6, -1] {
            let input = CreateTestimonial {
                author_name: "Ana".to_string(),
                body: "Excelente viaje".to_string(),
                rating: Some(rating),
                ..Default::default()
            };
            assert_eq!(input.validate().unwrap_err().field_names(), vec!["rating"]);
        }
    }

    #[test]
    fn create_requires_author_and_body() {
        let errors = CreateTestimonial::default().validate().unwrap_err();
        assert_eq!(errors.field_names(), vec!["author_name", "body"]);
    }

    #[test]
    fn update_can_change_rating_alone() {
        let input = UpdateTestimonial {
            rating: Some(4),
            ..Default::default()
        };
        assert!(input.validate().is_ok());
    }
}
