use serde::{Deserialize, Serialize};

use crate::common::utils::slug_or_derive;
use crate::common::{TemplateId, Validate, ValidationErrors};
use crate::domains::whatsapp::models::{
    CreateTemplate, TemplateCategory, UpdateTemplate, WhatsAppTemplate,
};
use crate::domains::whatsapp::template::{tokens_in, MissingVariable};

const MAX_BODY_CHARS: usize = 1000;

#[derive(Debug, Clone, Serialize)]
pub struct TemplateData {
    pub id: TemplateId,
    pub slug: String,
    pub name: String,
    pub category: TemplateCategory,
    pub body: String,
    pub is_default: bool,
    /// Recognized tokens used by the body, for the dashboard editor
    pub tokens: Vec<&'static str>,
}

impl From<WhatsAppTemplate> for TemplateData {
    fn from(template: WhatsAppTemplate) -> Self {
        Self {
            category: template.category(),
            tokens: tokens_in(&template.body),
            id: template.id,
            slug: template.slug,
            name: template.name,
            body: template.body,
            is_default: template.is_default,
        }
    }
}

fn check_body(errors: &mut ValidationErrors, field: &str, body: &str) {
    errors.require_text(field, body);
    if body.chars().count() > MAX_BODY_CHARS {
        errors.add(field, format!("must be at most {} characters", MAX_BODY_CHARS));
    }
}

impl CreateTemplate {
    pub fn resolved_slug(&self) -> String {
        slug_or_derive(self.slug.as_deref(), &self.name)
    }
}

impl Validate for CreateTemplate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("name", &self.name);
        if !self.name.trim().is_empty() {
            errors.check_slug("slug", Some(&self.resolved_slug()));
        }
        check_body(&mut errors, "body", &self.body);
        errors.into_result()
    }
}

impl Validate for UpdateTemplate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.reject_blank("name", self.name.as_deref());
        errors.check_slug("slug", self.slug.as_deref());
        if let Some(body) = &self.body {
            check_body(&mut errors, "body", body);
        }
        errors.into_result()
    }
}

/// `POST /whatsapp/link` body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WhatsAppLinkRequest {
    pub item_title: Option<String>,
    /// Site path (`/paquetes/cancun`) or absolute URL of the item
    pub url: Option<String>,
    pub utm_source: Option<String>,
    pub utm_campaign: Option<String>,
    /// Picks the category default when no template is named
    #[serde(default)]
    pub category: TemplateCategory,
    pub template_slug: Option<String>,
    /// Inline body, used by the dashboard to preview unsaved templates
    pub template_body: Option<String>,
    /// Overrides the agency number
    pub phone: Option<String>,
    #[serde(default)]
    pub missing: MissingVariable,
}

impl Validate for WhatsAppLinkRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(body) = &self.template_body {
            check_body(&mut errors, "template_body", body);
        }
        errors.check_slug("template_slug", self.template_slug.as_deref());
        errors.reject_blank("phone", self.phone.as_deref());
        errors.into_result()
    }
}

/// Where the message body came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "slug", rename_all = "snake_case")]
pub enum TemplateSource {
    Inline,
    Template(String),
    BuiltIn,
}

#[derive(Debug, Clone, Serialize)]
pub struct WhatsAppLinkData {
    pub link: String,
    pub message: String,
    pub source: TemplateSource,
}
