//! Image fallback selection for display payloads.
//!
//! Legacy rows and half-filled admin forms leave placeholder values such as
//! `""`, `"1"` or `"null"` in image columns; those render as broken images,
//! so every response DTO resolves them to the configured fallback.

pub const DEFAULT_FALLBACK_IMAGE_URL: &str = "/images/fallback.jpg";

/// True when the stored value cannot be used as an image source.
pub fn is_placeholder_image(url: Option<&str>) -> bool {
    match url.map(str::trim) {
        None => true,
        Some(v) => v.is_empty() || v == "1" || v.eq_ignore_ascii_case("null"),
    }
}

/// The stored URL when usable, otherwise `fallback`.
pub fn resolve_image_url(url: Option<&str>, fallback: &str) -> String {
    if is_placeholder_image(url) {
        fallback.to_string()
    } else {
        url.unwrap_or(fallback).trim().to_string()
    }
}

/// Gallery variant: placeholder entries are dropped rather than replaced.
pub fn clean_gallery(urls: Vec<String>) -> Vec<String> {
    urls.into_iter()
        .filter(|u| !is_placeholder_image(Some(u)))
        .collect()
}

/// Documents (PDF brochures) have no fallback: placeholders become `None`.
pub fn optional_media_url(url: Option<String>) -> Option<String> {
    url.filter(|u| !is_placeholder_image(Some(u)))
        .map(|u| u.trim().to_string())
}
