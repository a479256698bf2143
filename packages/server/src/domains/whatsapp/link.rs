//! `wa.me` deep links and tracked item URLs.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use url::Url;

use crate::server::ApiError;

const WA_ME_BASE: &str = "https://wa.me";

lazy_static! {
    static ref NON_DIGITS: Regex = Regex::new(r"\D+").unwrap();
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("phone number contains no digits")]
    EmptyPhone,

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<LinkError> for ApiError {
    fn from(err: LinkError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// Digits only: `+52 (55) 1234-5678` -> `525512345678`.
pub fn normalize_phone(raw: &str) -> Result<String, LinkError> {
    let digits = NON_DIGITS.replace_all(raw, "").into_owned();
    if digits.is_empty() {
        return Err(LinkError::EmptyPhone);
    }
    Ok(digits)
}

/// `https://wa.me/<digits>?text=<percent-encoded message>`
pub fn build_wa_link(phone: &str, message: &str) -> Result<String, LinkError> {
    let phone = normalize_phone(phone)?;
    if message.is_empty() {
        return Ok(format!("{}/{}", WA_ME_BASE, phone));
    }
    Ok(format!(
        "{}/{}?text={}",
        WA_ME_BASE,
        phone,
        urlencoding::encode(message)
    ))
}

/// Absolute URL for an item with optional UTM parameters appended.
///
/// `target` may be absolute (used as is) or a site path joined onto
/// `site_url`. Existing query parameters are kept.
pub fn tracking_url(
    site_url: &str,
    target: &str,
    utm_source: Option<&str>,
    utm_campaign: Option<&str>,
) -> Result<String, LinkError> {
    let mut url = match Url::parse(target) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(site_url)
            .and_then(|base| base.join(target))
            .map_err(|e| LinkError::InvalidUrl(format!("{}: {}", target, e)))?,
        Err(e) => return Err(LinkError::InvalidUrl(format!("{}: {}", target, e))),
    };

    let params: Vec<(&str, &str)> = [("utm_source", utm_source), ("utm_campaign", utm_campaign)]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (key, v))
        })
        .collect();

    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_keeps_only_digits() {
        assert_eq!(normalize_phone("+52 (55) 1234-5678").unwrap(), "525512345678");
        assert_eq!(normalize_phone("5215512345678").unwrap(), "5215512345678");
    }

    #[test]
    fn phone_without_digits_is_rejected() {
        assert_eq!(normalize_phone("+() -"), Err(LinkError::EmptyPhone));
        assert_eq!(normalize_phone(""), Err(LinkError::EmptyPhone));
    }

    #[test]
    fn message_is_percent_encoded() {
        let link = build_wa_link("+52 55 1234 5678", "Hola, me interesa Cancún & más").unwrap();
        assert_eq!(
            link,
            "https://wa.me/525512345678?text=Hola%2C%20me%20interesa%20Canc%C3%BAn%20%26%20m%C3%A1s"
        );
    }

    #[test]
    fn empty_message_links_to_chat_only() {
        assert_eq!(build_wa_link("5512345678", "").unwrap(), "https://wa.me/5512345678");
    }

    #[test]
    fn relative_paths_join_the_site_url() {
        let url = tracking_url(
            "https://agencia.mx",
            "/paquetes/cancun",
            Some("whatsapp"),
            Some("verano 2025"),
        )
        .unwrap();
        assert_eq!(
            url,
            "https://agencia.mx/paquetes/cancun?utm_source=whatsapp&utm_campaign=verano+2025"
        );
    }

    #[test]
    fn absolute_urls_keep_their_query() {
        let url = tracking_url(
            "https://agencia.mx",
            "https://promo.agencia.mx/oferta?id=7",
            Some("ig"),
            None,
        )
        .unwrap();
        assert_eq!(url, "https://promo.agencia.mx/oferta?id=7&utm_source=ig");
    }

    #[test]
    fn blank_utm_values_are_skipped() {
        let url = tracking_url("https://agencia.mx", "/bodas", Some(" "), None).unwrap();
        assert_eq!(url, "https://agencia.mx/bodas");
    }

    #[test]
    fn unusable_base_is_an_error() {
        assert!(matches!(
            tracking_url("not a url", "/bodas", None, None),
            Err(LinkError::InvalidUrl(_))
        ));
    }
}
