use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::common::utils::{clean_gallery, resolve_image_url, slug_or_derive};
use crate::common::{DestinationId, Validate, ValidationErrors};
use crate::domains::destinations::models::{CreateDestination, Destination, UpdateDestination};
use crate::domains::tag::data::TagData;
use crate::domains::tag::models::Tag;

/// Destination card / detail payload
#[derive(Debug, Clone, Serialize)]
pub struct DestinationData {
    pub id: DestinationId,
    pub slug: String,
    pub name: String,
    pub country: Option<String>,
    pub region: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub image_url: String,
    pub gallery: Vec<String>,
    pub featured: bool,
    pub published: bool,
    pub tags: Vec<TagData>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DestinationData {
    pub fn from_model(destination: Destination, tags: Vec<Tag>, fallback_image: &str) -> Self {
        Self {
            image_url: resolve_image_url(destination.image_url.as_deref(), fallback_image),
            gallery: clean_gallery(destination.gallery),
            id: destination.id,
            slug: destination.slug,
            name: destination.name,
            country: destination.country,
            region: destination.region,
            summary: destination.summary,
            description: destination.description,
            featured: destination.featured,
            published: destination.published,
            tags: tags.into_iter().map(TagData::from).collect(),
            created_at: destination.created_at,
            updated_at: destination.updated_at,
        }
    }
}

impl CreateDestination {
    pub fn resolved_slug(&self) -> String {
        slug_or_derive(self.slug.as_deref(), &self.name)
    }
}

impl Validate for CreateDestination {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("name", &self.name);
        if !self.name.trim().is_empty() {
            errors.check_slug("slug", Some(&self.resolved_slug()));
        }
        errors.check_url("image_url", self.image_url.as_deref());
        errors.check_urls("gallery", Some(&self.gallery));
        errors.into_result()
    }
}

impl Validate for UpdateDestination {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.reject_blank("name", self.name.as_deref());
        errors.check_slug("slug", self.slug.as_deref());
        errors.check_url("image_url", self.image_url.as_deref());
        errors.check_urls("gallery", self.gallery.as_deref());
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::utils::DEFAULT_FALLBACK_IMAGE_URL;

    fn destination(image_url: Option<&str>) -> Destination {
        Destination {
            id: DestinationId::new(),
            slug: "cancun".to_string(),
            name: "Cancún".to_string(),
            country: Some("México".to_string()),
            region: Some("caribe".to_string()),
            summary: None,
            description: None,
            image_url: image_url.map(str::to_string),
            gallery: vec![
                "https://cdn.example.com/a.jpg".to_string(),
                "null".to_string(),
                "".to_string(),
            ],
            featured: true,
            published: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn placeholder_image_uses_fallback() {
        for raw in [None, Some(""), Some("1"), Some("null")] {
            let data = DestinationData::from_model(destination(raw), vec![], DEFAULT_FALLBACK_IMAGE_URL);
            assert_eq!(data.image_url, DEFAULT_FALLBACK_IMAGE_URL);
        }
    }

    #[test]
    fn gallery_drops_placeholders() {
        let data = DestinationData::from_model(
            destination(Some("/images/cancun.jpg")),
            vec![],
            DEFAULT_FALLBACK_IMAGE_URL,
        );
        assert_eq!(data.image_url, "/images/cancun.jpg");
        assert_eq!(data.gallery, vec!["https://cdn.example.com/a.jpg".to_string()]);
    }

    #[test]
    fn create_requires_name_and_valid_media() {
        let input = CreateDestination {
            image_url: Some("ftp://files.example.com/x.jpg".to_string()),
            ..Default::default()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.field_names(), vec!["image_url", "name"]);
    }

    #[test]
    fn create_derives_slug_from_accented_name() {
        let input = CreateDestination {
            name: "Riviera Maya & Tulum".to_string(),
            ..Default::default()
        };
        assert!(input.validate().is_ok());
        assert_eq!(input.resolved_slug(), "riviera-maya-tulum");
    }

    #[test]
    fn update_rejects_blank_name() {
        let input = UpdateDestination {
            name: Some("".to_string()),
            ..Default::default()
        };
        assert!(input.validate().unwrap_err().contains("name"));
    }
}
