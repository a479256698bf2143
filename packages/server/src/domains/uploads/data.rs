use serde::{Deserialize, Serialize};

use crate::common::utils::slugify;
use crate::common::{Validate, ValidationErrors};

pub const IMAGE_CONTENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/gif",
    "image/avif",
];
pub const DOCUMENT_CONTENT_TYPES: &[&str] = &["application/pdf"];

const MAX_FILENAME_CHARS: usize = 200;

#[derive(Debug, Clone, Deserialize)]
pub struct UploadRequest {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub content_type: String,
    /// Key prefix; defaults to `images` or `documents` by content type
    pub folder: Option<String>,
}

impl UploadRequest {
    fn content_type(&self) -> String {
        self.content_type.trim().to_ascii_lowercase()
    }

    pub fn is_allowed_type(&self) -> bool {
        let content_type = self.content_type();
        IMAGE_CONTENT_TYPES.contains(&content_type.as_str())
            || DOCUMENT_CONTENT_TYPES.contains(&content_type.as_str())
    }

    pub fn folder(&self) -> String {
        match self.folder.as_deref().map(slugify).filter(|f| !f.is_empty()) {
            Some(folder) => folder,
            None if DOCUMENT_CONTENT_TYPES.contains(&self.content_type().as_str()) => {
                "documents".to_string()
            }
            None => "images".to_string(),
        }
    }

    /// `<folder>/<id>-<sanitized filename>`
    pub fn object_key(&self, id: impl std::fmt::Display) -> String {
        format!("{}/{}-{}", self.folder(), id, sanitize_filename(&self.filename))
    }
}

/// Slugified stem plus lowercase extension: `Mi Foto (1).JPG` -> `mi-foto-1.jpg`.
pub fn sanitize_filename(filename: &str) -> String {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename).trim();

    let (stem, extension) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    };

    let stem = match slugify(stem) {
        s if s.is_empty() => "file".to_string(),
        s => s,
    };

    match extension.map(slugify).filter(|e| !e.is_empty()) {
        Some(ext) => format!("{}.{}", stem, ext),
        None => stem,
    }
}

impl Validate for UploadRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("filename", &self.filename);
        if self.filename.chars().count() > MAX_FILENAME_CHARS {
            errors.add(
                "filename",
                format!("must be at most {} characters", MAX_FILENAME_CHARS),
            );
        }
        if self.content_type.trim().is_empty() {
            errors.add("content_type", "is required");
        } else if !self.is_allowed_type() {
            errors.add("content_type", "must be an image (jpeg, png, webp, gif, avif) or a pdf");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadTicket {
    pub key: String,
    pub upload_url: String,
    pub public_url: String,
    pub expires_in_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(filename: &str, content_type: &str, folder: Option<&str>) -> UploadRequest {
        UploadRequest {
            filename: filename.to_string(),
            content_type: content_type.to_string(),
            folder: folder.map(str::to_string),
        }
    }

    #[test]
    fn filenames_are_sanitized() {
        assert_eq!(sanitize_filename("Mi Foto (1).JPG"), "mi-foto-1.jpg");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\fotos\\Cancún.png"), "cancun.png");
        assert_eq!(sanitize_filename(".env"), "env");
        assert_eq!(sanitize_filename("¿?.pdf"), "file.pdf");
    }

    #[test]
    fn folder_defaults_by_content_type() {
        assert_eq!(request("a.png", "image/png", None).folder(), "images");
        assert_eq!(request("a.pdf", "application/pdf", None).folder(), "documents");
        assert_eq!(request("a.pdf", "application/pdf", Some("Paquetes")).folder(), "paquetes");
        assert_eq!(request("a.png", "image/png", Some("../")).folder(), "images");
    }

    #[test]
    fn object_key_joins_folder_id_and_name() {
        let key = request("Tulum Beach.webp", "image/webp", None).object_key("0190");
        assert_eq!(key, "images/0190-tulum-beach.webp");
    }

    #[test]
    fn only_images_and_pdfs_are_accepted() {
        assert!(request("a.png", "IMAGE/PNG", None).validate().is_ok());
        assert!(request("a.avif", "image/avif", None).validate().is_ok());

        let errors = request("a.exe", "application/x-msdownload", None)
            .validate()
            .unwrap_err();
        assert_eq!(errors.field_names(), vec!["content_type"]);
    }

    #[test]
    fn missing_fields_are_reported_together() {
        let errors = request("", "", None).validate().unwrap_err();
        assert!(errors.contains("filename"));
        assert!(errors.contains("content_type"));
    }
}
