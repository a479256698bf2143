use serde::{Deserialize, Serialize};

use crate::common::utils::slug_or_derive;
use crate::common::{TagId, Validate, ValidationErrors};
use crate::domains::tag::models::Tag;

/// Tag as returned to the site and the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagData {
    pub id: TagId,
    pub slug: String,
    pub name: String,
}

impl From<Tag> for TagData {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            slug: tag.slug,
            name: tag.name,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTagInput {
    pub slug: Option<String>,
    #[serde(default)]
    pub name: String,
}

impl CreateTagInput {
    pub fn resolved_slug(&self) -> String {
        slug_or_derive(self.slug.as_deref(), &self.name)
    }
}

impl Validate for CreateTagInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("name", &self.name);
        if !self.name.trim().is_empty() {
            errors.check_slug("slug", Some(&self.resolved_slug()));
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTagInput {
    pub slug: Option<String>,
    pub name: Option<String>,
}

impl Validate for UpdateTagInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.reject_blank("name", self.name.as_deref());
        errors.check_slug("slug", self.slug.as_deref());
        errors.into_result()
    }
}
