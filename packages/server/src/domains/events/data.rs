use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::common::utils::{resolve_image_url, slug_or_derive};
use crate::common::{EventId, Validate, ValidationErrors};
use crate::domains::events::models::{CreateEvent, Event, UpdateEvent};

#[derive(Debug, Clone, Serialize)]
pub struct EventData {
    pub id: EventId,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub image_url: String,
    pub price: Option<Decimal>,
    pub is_upcoming: bool,
    pub published: bool,
}

impl EventData {
    pub fn from_model(event: Event, now: DateTime<Utc>, fallback_image: &str) -> Self {
        Self {
            is_upcoming: event.is_upcoming_at(now),
            image_url: resolve_image_url(event.image_url.as_deref(), fallback_image),
            id: event.id,
            slug: event.slug,
            title: event.title,
            description: event.description,
            location: event.location,
            starts_at: event.starts_at,
            ends_at: event.ends_at,
            price: event.price,
            published: event.published,
        }
    }
}

impl CreateEvent {
    pub fn resolved_slug(&self) -> String {
        slug_or_derive(self.slug.as_deref(), &self.title)
    }
}

impl Validate for CreateEvent {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("title", &self.title);
        if !self.title.trim().is_empty() {
            errors.check_slug("slug", Some(&self.resolved_slug()));
        }
        if self.starts_at.is_none() {
            errors.add("starts_at", "is required");
        }
        errors.check_order("ends_at", self.starts_at, self.ends_at, "must not be before starts_at");
        errors.check_non_negative("price", self.price);
        errors.check_url("image_url", self.image_url.as_deref());
        errors.into_result()
    }
}

impl Validate for UpdateEvent {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.reject_blank("title", self.title.as_deref());
        errors.check_slug("slug", self.slug.as_deref());
        errors.check_order("ends_at", self.starts_at, self.ends_at, "must not be before starts_at");
        errors.check_non_negative("price", self.price);
        errors.check_url("image_url", self.image_url.as_deref());
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn create_requires_title_and_start() {
        let errors = CreateEvent::default().validate().unwrap_err();
        assert_eq!(errors.field_names(), vec!["starts_at", "title"]);
    }

    #[test]
    fn end_before_start_is_rejected() {
        let start = Utc.with_ymd_and_hms(2025, 9, 1, 18, 0, 0).unwrap();
        let input = CreateEvent {
            title: "Expo Viajes".to_string(),
            starts_at: Some(start),
            ends_at: Some(start - Duration::hours(1)),
            ..Default::default()
        };
        assert_eq!(input.validate().unwrap_err().field_names(), vec!["ends_at"]);
    }

    #[test]
    fn upcoming_uses_end_when_present() {
        let now = Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap();
        let event = Event {
            id: EventId::new(),
            slug: "expo".to_string(),
            title: "Expo".to_string(),
            description: None,
            location: None,
            starts_at: now - Duration::days(1),
            ends_at: Some(now + Duration::hours(2)),
            image_url: None,
            price: None,
            published: true,
            created_at: now,
            updated_at: now,
        };
        assert!(EventData::from_model(event.clone(), now, "/f.jpg").is_upcoming);

        let finished = Event { ends_at: None, ..event };
        assert!(!EventData::from_model(finished, now, "/f.jpg").is_upcoming);
    }
}
