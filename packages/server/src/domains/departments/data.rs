use rust_decimal::Decimal;
use serde::Serialize;

use crate::common::utils::{clean_gallery, resolve_image_url, slug_or_derive};
use crate::common::{DepartmentDestinationId, DepartmentId, Validate, ValidationErrors};
use crate::domains::departments::models::{
    CreateDepartment, CreateDepartmentDestination, Department, DepartmentDestination,
    DepartmentKind, UpdateDepartment, UpdateDepartmentDestination,
};

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentData {
    pub id: DepartmentId,
    pub slug: String,
    pub name: String,
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub hero_image_url: String,
    pub description: Option<String>,
    pub services: Vec<String>,
    pub published: bool,
    /// Venue catalogue behind this department, if it has one
    pub kind: Option<DepartmentKind>,
}

impl DepartmentData {
    pub fn from_model(department: Department, fallback_image: &str) -> Self {
        Self {
            hero_image_url: resolve_image_url(department.hero_image_url.as_deref(), fallback_image),
            kind: DepartmentKind::from_department_slug(&department.slug),
            id: department.id,
            slug: department.slug,
            name: department.name,
            hero_title: department.hero_title,
            hero_subtitle: department.hero_subtitle,
            description: department.description,
            services: department.services,
            published: department.published,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentDestinationData {
    pub id: DepartmentDestinationId,
    pub slug: String,
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub image_url: String,
    pub gallery: Vec<String>,
    pub price_from: Option<Decimal>,
    pub capacity: Option<i32>,
    pub featured: bool,
    pub published: bool,
}

impl DepartmentDestinationData {
    pub fn from_model(row: DepartmentDestination, fallback_image: &str) -> Self {
        Self {
            image_url: resolve_image_url(row.image_url.as_deref(), fallback_image),
            gallery: clean_gallery(row.gallery),
            id: row.id,
            slug: row.slug,
            name: row.name,
            location: row.location,
            description: row.description,
            price_from: row.price_from,
            capacity: row.capacity,
            featured: row.featured,
            published: row.published,
        }
    }
}

/// Department landing page: hero plus its venue list
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentPageData {
    pub department: DepartmentData,
    pub destinations: Vec<DepartmentDestinationData>,
}

impl CreateDepartment {
    pub fn resolved_slug(&self) -> String {
        slug_or_derive(self.slug.as_deref(), &self.name)
    }
}

impl Validate for CreateDepartment {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("name", &self.name);
        if !self.name.trim().is_empty() {
            errors.check_slug("slug", Some(&self.resolved_slug()));
        }
        errors.check_url("hero_image_url", self.hero_image_url.as_deref());
        errors.into_result()
    }
}

impl Validate for UpdateDepartment {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.reject_blank("name", self.name.as_deref());
        errors.check_slug("slug", self.slug.as_deref());
        errors.check_url("hero_image_url", self.hero_image_url.as_deref());
        errors.into_result()
    }
}

impl CreateDepartmentDestination {
    pub fn resolved_slug(&self) -> String {
        slug_or_derive(self.slug.as_deref(), &self.name)
    }
}

impl Validate for CreateDepartmentDestination {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("name", &self.name);
        if !self.name.trim().is_empty() {
            errors.check_slug("slug", Some(&self.resolved_slug()));
        }
        errors.check_url("image_url", self.image_url.as_deref());
        errors.check_urls("gallery", Some(&self.gallery));
        errors.check_non_negative("price_from", self.price_from);
        errors.check_range("capacity", self.capacity, 1, 100_000);
        errors.into_result()
    }
}

impl Validate for UpdateDepartmentDestination {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.reject_blank("name", self.name.as_deref());
        errors.check_slug("slug", self.slug.as_deref());
        errors.check_url("image_url", self.image_url.as_deref());
        errors.check_urls("gallery", self.gallery.as_deref());
        errors.check_non_negative("price_from", self.price_from);
        errors.check_range("capacity", self.capacity, 1, 100_000);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn department_exposes_its_venue_kind() {
        let department = Department {
            id: DepartmentId::new(),
            slug: "weddings".to_string(),
            name: "Bodas".to_string(),
            hero_title: Some("Bodas de destino".to_string()),
            hero_subtitle: None,
            hero_image_url: Some("null".to_string()),
            description: None,
            services: vec!["Coordinación".to_string()],
            published: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let data = DepartmentData::from_model(department, "/fallback.jpg");
        assert_eq!(data.kind, Some(DepartmentKind::Wedding));
        assert_eq!(data.hero_image_url, "/fallback.jpg");
    }

    #[test]
    fn venue_capacity_must_be_positive() {
        let input = CreateDepartmentDestination {
            name: "Hacienda San Gabriel".to_string(),
            capacity: Some(0),
            ..Default::default()
        };
        assert_eq!(input.validate().unwrap_err().field_names(), vec!["capacity"]);
    }

    #[test]
    fn department_requires_name() {
        let errors = CreateDepartment::default().validate().unwrap_err();
        assert_eq!(errors.field_names(), vec!["name"]);
    }
}
