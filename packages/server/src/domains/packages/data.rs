use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::common::utils::{optional_media_url, resolve_image_url, slug_or_derive};
use crate::common::{DestinationId, PackageId, Validate, ValidationErrors};
use crate::domains::packages::models::{CreatePackage, PackageWithDestination, UpdatePackage};
use crate::domains::tag::data::TagData;
use crate::domains::tag::models::Tag;

/// Destination reference embedded in package cards
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DestinationRef {
    pub id: DestinationId,
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PackageData {
    pub id: PackageId,
    pub slug: String,
    pub title: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub destination: Option<DestinationRef>,
    pub duration_days: Option<i32>,
    pub price_from: Option<Decimal>,
    pub currency: String,
    pub includes: Vec<String>,
    pub image_url: String,
    pub pdf_url: Option<String>,
    pub featured: bool,
    pub published: bool,
    pub tags: Vec<TagData>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PackageData {
    pub fn from_model(row: PackageWithDestination, tags: Vec<Tag>, fallback_image: &str) -> Self {
        let destination = match (row.package.destination_id, row.destination_slug, row.destination_name) {
            (Some(id), Some(slug), Some(name)) => Some(DestinationRef { id, slug, name }),
            _ => None,
        };
        let package = row.package;

        Self {
            image_url: resolve_image_url(package.image_url.as_deref(), fallback_image),
            pdf_url: optional_media_url(package.pdf_url),
            id: package.id,
            slug: package.slug,
            title: package.title,
            summary: package.summary,
            description: package.description,
            destination,
            duration_days: package.duration_days,
            price_from: package.price_from,
            currency: package.currency,
            includes: package.includes,
            featured: package.featured,
            published: package.published,
            tags: tags.into_iter().map(TagData::from).collect(),
            created_at: package.created_at,
            updated_at: package.updated_at,
        }
    }
}

impl CreatePackage {
    pub fn resolved_slug(&self) -> String {
        slug_or_derive(self.slug.as_deref(), &self.title)
    }
}

impl Validate for CreatePackage {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("title", &self.title);
        if !self.title.trim().is_empty() {
            errors.check_slug("slug", Some(&self.resolved_slug()));
        }
        errors.check_range("duration_days", self.duration_days, 1, 365);
        errors.check_non_negative("price_from", self.price_from);
        errors.check_currency("currency", self.currency.as_deref());
        errors.check_url("image_url", self.image_url.as_deref());
        errors.check_url("pdf_url", self.pdf_url.as_deref());
        errors.into_result()
    }
}

impl Validate for UpdatePackage {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.reject_blank("title", self.title.as_deref());
        errors.check_slug("slug", self.slug.as_deref());
        errors.check_range("duration_days", self.duration_days, 1, 365);
        errors.check_non_negative("price_from", self.price_from);
        errors.check_currency("currency", self.currency.as_deref());
        errors.check_url("image_url", self.image_url.as_deref());
        errors.check_url("pdf_url", self.pdf_url.as_deref());
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::packages::models::Package;
    use std::str::FromStr;

    fn row(destination: bool) -> PackageWithDestination {
        let destination_id = DestinationId::new();
        PackageWithDestination {
            package: Package {
                id: PackageId::new(),
                slug: "cancun-todo-incluido".to_string(),
                title: "Cancún Todo Incluido".to_string(),
                summary: None,
                description: None,
                destination_id: destination.then_some(destination_id),
                duration_days: Some(5),
                price_from: Some(Decimal::from_str("12999.00").unwrap()),
                currency: "MXN".to_string(),
                includes: vec!["Vuelo".to_string(), "Hotel".to_string()],
                image_url: Some("1".to_string()),
                pdf_url: Some("null".to_string()),
                featured: false,
                published: true,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            destination_slug: destination.then(|| "cancun".to_string()),
            destination_name: destination.then(|| "Cancún".to_string()),
        }
    }

    #[test]
    fn embeds_destination_reference() {
        let data = PackageData::from_model(row(true), vec![], "/fallback.jpg");
        assert_eq!(data.destination.map(|d| d.slug), Some("cancun".to_string()));

        let data = PackageData::from_model(row(false), vec![], "/fallback.jpg");
        assert!(data.destination.is_none());
    }

    #[test]
    fn placeholder_media_is_normalised() {
        let data = PackageData::from_model(row(false), vec![], "/fallback.jpg");
        assert_eq!(data.image_url, "/fallback.jpg");
        assert_eq!(data.pdf_url, None);
    }

    #[test]
    fn create_rejects_missing_title_and_negative_price() {
        let input = CreatePackage {
            title: "  ".to_string(),
            price_from: Some(Decimal::from_str("-1").unwrap()),
            duration_days: Some(0),
            ..Default::default()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.field_names(), vec!["duration_days", "price_from", "title"]);
    }

    #[test]
    fn update_with_only_price_is_valid() {
        let input = UpdatePackage {
            price_from: Some(Decimal::from_str("9999.50").unwrap()),
            ..Default::default()
        };
        assert!(input.validate().is_ok());
    }
}
