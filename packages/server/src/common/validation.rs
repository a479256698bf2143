//! Input validation for admin create/update payloads.
//!
//! Handlers call [`Validate::validate`] before touching the database, so a
//! form with a blank required field never reaches a query. All failing fields
//! are reported at once.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use url::Url;

lazy_static! {
    static ref SLUG_PATTERN: Regex = Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();
}

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Field name -> first failure message for that field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("validation failed for: {}", self.field_names().join(", "))]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure; the first message recorded for a field wins.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Required on create: must be present and not blank.
    pub fn require_text(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "is required");
        }
    }

    /// Optional on update: absent is fine, present-but-blank is not.
    pub fn reject_blank(&mut self, field: &str, value: Option<&str>) {
        if let Some(v) = value {
            self.require_text(field, v);
        }
    }

    pub fn check_slug(&mut self, field: &str, value: Option<&str>) {
        if let Some(slug) = value {
            if !SLUG_PATTERN.is_match(slug) {
                self.add(
                    field,
                    "must contain only lowercase letters, digits and single hyphens",
                );
            }
        }
    }

    /// Media links: blank is treated as unset; otherwise absolute http(s)
    /// or a site-relative path.
    pub fn check_url(&mut self, field: &str, value: Option<&str>) {
        let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return;
        };
        if raw.starts_with('/') && !raw.starts_with("//") {
            return;
        }
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => self.add(field, format!("unsupported URL scheme: {}", url.scheme())),
            Err(_) => self.add(field, "must be an absolute http(s) URL or a path starting with /"),
        }
    }

    pub fn check_urls(&mut self, field: &str, values: Option<&[String]>) {
        for value in values.unwrap_or_default() {
            self.check_url(field, Some(value));
        }
    }

    pub fn check_non_negative(&mut self, field: &str, value: Option<Decimal>) {
        if matches!(value, Some(v) if v.is_sign_negative() && !v.is_zero()) {
            self.add(field, "must not be negative");
        }
    }

    pub fn check_range(&mut self, field: &str, value: Option<i32>, min: i32, max: i32) {
        if let Some(v) = value {
            if v < min || v > max {
                self.add(field, format!("must be between {} and {}", min, max));
            }
        }
    }

    /// ISO 4217 style code: three uppercase ASCII letters
    pub fn check_currency(&mut self, field: &str, value: Option<&str>) {
        if let Some(code) = value {
            if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
                self.add(field, "must be a three-letter currency code such as MXN");
            }
        }
    }

    /// Both ends present and out of order -> error on `field`.
    pub fn check_order<T: PartialOrd>(
        &mut self,
        field: &str,
        start: Option<T>,
        end: Option<T>,
        message: &str,
    ) {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                self.add(field, message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn blank_required_text_is_reported() {
        let mut errors = ValidationErrors::new();
        errors.require_text("title", "   ");
        errors.require_text("name", "Cancún");
        assert!(errors.contains("title"));
        assert!(!errors.contains("name"));
    }

    #[test]
    fn currency_codes() {
        let mut errors = ValidationErrors::new();
        errors.check_currency("ok", Some("USD"));
        errors.check_currency("lower", Some("mxn"));
        errors.check_currency("long", Some("EURO"));
        errors.check_currency("absent", None);
        assert_eq!(errors.field_names(), vec!["long", "lower"]);
    }

    #[test]
    fn first_message_per_field_wins() {
        let mut errors = ValidationErrors::new();
        errors.add("slug", "first");
        errors.add("slug", "second");
        assert_eq!(errors.get("slug"), Some("first"));
    }

    #[test]
    fn slug_rules() {
        let mut errors = ValidationErrors::new();
        errors.check_slug("ok", Some("riviera-maya-2025"));
        errors.check_slug("upper", Some("Riviera"));
        errors.check_slug("double", Some("riviera--maya"));
        errors.check_slug("edge", Some("-riviera"));
        assert_eq!(errors.field_names(), vec!["double", "edge", "upper"]);
    }

    #[test]
    fn url_rules() {
        let mut errors = ValidationErrors::new();
        errors.check_url("blank", Some(""));
        errors.check_url("relative", Some("/images/cancun.jpg"));
        errors.check_url("https", Some("https://cdn.example.com/a.jpg"));
        errors.check_url("ftp", Some("ftp://example.com/a.jpg"));
        errors.check_url("junk", Some("cancun.jpg"));
        errors.check_url("protocol_relative", Some("//cdn.example.com/a.jpg"));
        assert_eq!(
            errors.field_names(),
            vec!["ftp", "junk", "protocol_relative"]
        );
    }

    #[test]
    fn negative_prices_and_out_of_order_ranges() {
        let mut errors = ValidationErrors::new();
        errors.check_non_negative("price", Some(Decimal::from_str("-1.50").unwrap()));
        errors.check_non_negative("zero", Some(Decimal::ZERO));
        errors.check_order("valid_until", Some(5), Some(3), "must not be before valid_from");
        errors.check_order("same", Some(3), Some(3), "unused");
        errors.check_range("rating", Some(6), 1, 5);
        assert_eq!(errors.field_names(), vec!["price", "rating", "valid_until"]);
    }

    #[test]
    fn serializes_as_field_map() {
        let mut errors = ValidationErrors::new();
        errors.require_text("title", "");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({ "title": "is required" }));
    }
}
