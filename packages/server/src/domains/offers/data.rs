use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::common::utils::{optional_media_url, resolve_image_url, slug_or_derive};
use crate::common::{DestinationId, OfferId, PackageId, Validate, ValidationErrors};
use crate::domains::offers::models::{CreateOffer, Offer, UpdateOffer};

#[derive(Debug, Clone, Serialize)]
pub struct OfferData {
    pub id: OfferId,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub original_price: Option<Decimal>,
    /// Whole-percent saving when `original_price` is above `price`
    pub discount_percent: Option<u32>,
    pub currency: String,
    pub valid_from: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub is_active: bool,
    pub package_id: Option<PackageId>,
    pub destination_id: Option<DestinationId>,
    pub image_url: String,
    pub pdf_url: Option<String>,
    pub featured: bool,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OfferData {
    pub fn from_model(offer: Offer, today: NaiveDate, fallback_image: &str) -> Self {
        Self {
            is_active: offer.is_active_on(today),
            discount_percent: discount_percent(offer.price, offer.original_price),
            image_url: resolve_image_url(offer.image_url.as_deref(), fallback_image),
            pdf_url: optional_media_url(offer.pdf_url),
            id: offer.id,
            slug: offer.slug,
            title: offer.title,
            description: offer.description,
            price: offer.price,
            original_price: offer.original_price,
            currency: offer.currency,
            valid_from: offer.valid_from,
            valid_until: offer.valid_until,
            package_id: offer.package_id,
            destination_id: offer.destination_id,
            featured: offer.featured,
            published: offer.published,
            created_at: offer.created_at,
            updated_at: offer.updated_at,
        }
    }
}

/// Rounded-down percentage saved; `None` unless both prices are set and
/// the original is strictly higher.
pub fn discount_percent(price: Option<Decimal>, original: Option<Decimal>) -> Option<u32> {
    use rust_decimal::prelude::ToPrimitive;

    let (price, original) = (price?, original?);
    if original <= Decimal::ZERO || price >= original {
        return None;
    }
    ((original - price) * Decimal::ONE_HUNDRED / original)
        .floor()
        .to_u32()
}

impl CreateOffer {
    pub fn resolved_slug(&self) -> String {
        slug_or_derive(self.slug.as_deref(), &self.title)
    }
}

impl Validate for CreateOffer {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("title", &self.title);
        if !self.title.trim().is_empty() {
            errors.check_slug("slug", Some(&self.resolved_slug()));
        }
        errors.check_non_negative("price", self.price);
        errors.check_non_negative("original_price", self.original_price);
        errors.check_currency("currency", self.currency.as_deref());
        errors.check_order(
            "valid_until",
            self.valid_from,
            self.valid_until,
            "must not be before valid_from",
        );
        errors.check_url("image_url", self.image_url.as_deref());
        errors.check_url("pdf_url", self.pdf_url.as_deref());
        errors.into_result()
    }
}

impl Validate for UpdateOffer {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.reject_blank("title", self.title.as_deref());
        errors.check_slug("slug", self.slug.as_deref());
        errors.check_non_negative("price", self.price);
        errors.check_non_negative("original_price", self.original_price);
        errors.check_currency("currency", self.currency.as_deref());
        errors.check_order(
            "valid_until",
            self.valid_from,
            self.valid_until,
            "must not be before valid_from",
        );
        errors.check_url("image_url", self.image_url.as_deref());
        errors.check_url("pdf_url", self.pdf_url.as_deref());
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Option<Decimal> {
        Some(Decimal::from_str(s).unwrap())
    }

    #[test]
    fn discount_is_rounded_down() {
        assert_eq!(discount_percent(dec("7500"), dec("10000")), Some(25));
        assert_eq!(discount_percent(dec("9999"), dec("10000")), Some(0));
        assert_eq!(discount_percent(dec("6666"), dec("10000")), Some(33));
    }

    #[test]
    fn no_discount_without_a_higher_original() {
        assert_eq!(discount_percent(dec("100"), None), None);
        assert_eq!(discount_percent(dec("100"), dec("100")), None);
        assert_eq!(discount_percent(dec("120"), dec("100")), None);
        assert_eq!(discount_percent(dec("0"), dec("0")), None);
    }

    #[test]
    fn create_rejects_inverted_window() {
        let input = CreateOffer {
            title: "Semana Santa".to_string(),
            valid_from: NaiveDate::from_ymd_opt(2025, 4, 20),
            valid_until: NaiveDate::from_ymd_opt(2025, 4, 1),
            ..Default::default()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.field_names(), vec!["valid_until"]);
    }

    #[test]
    fn create_requires_title() {
        let errors = CreateOffer::default().validate().unwrap_err();
        assert!(errors.contains("title"));
    }
}
