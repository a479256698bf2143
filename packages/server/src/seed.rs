//! Baseline content for a fresh database.
//!
//! Every record goes through the same validation as the admin API and is
//! written with an upsert keyed on its slug, so running the seed again
//! refreshes the rows instead of duplicating them.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{debug, info};

use crate::common::TagId;
use crate::domains::departments::activities::{upsert_department, upsert_department_destination};
use crate::domains::departments::models::{
    CreateDepartment, CreateDepartmentDestination, DepartmentKind,
};
use crate::domains::destinations::activities::upsert_destination;
use crate::domains::destinations::CreateDestination;
use crate::domains::offers::activities::upsert_offer;
use crate::domains::offers::CreateOffer;
use crate::domains::packages::activities::upsert_package;
use crate::domains::packages::CreatePackage;
use crate::domains::tag::activities::upsert_tag;
use crate::domains::tag::data::CreateTagInput;
use crate::domains::tag::models::Tag;
use crate::domains::testimonials::activities::seed_testimonial;
use crate::domains::testimonials::models::CreateTestimonial;
use crate::domains::whatsapp::activities::upsert_template;
use crate::domains::whatsapp::models::CreateTemplate;
use crate::server::ApiError;

const BASELINE_JSON: &str = include_str!("../data/seed.json");

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub tags: Vec<CreateTagInput>,
    #[serde(default)]
    pub destinations: Vec<SeedDestination>,
    #[serde(default)]
    pub packages: Vec<SeedPackage>,
    #[serde(default)]
    pub offers: Vec<CreateOffer>,
    #[serde(default)]
    pub templates: Vec<CreateTemplate>,
    #[serde(default)]
    pub departments: Vec<SeedDepartment>,
    #[serde(default)]
    pub testimonials: Vec<CreateTestimonial>,
}

/// Destination plus the slugs of its tags
#[derive(Debug, Clone, Deserialize)]
pub struct SeedDestination {
    #[serde(flatten)]
    pub destination: CreateDestination,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedPackage {
    #[serde(flatten)]
    pub package: CreatePackage,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Department with the venues listed on its page
#[derive(Debug, Clone, Deserialize)]
pub struct SeedDepartment {
    #[serde(flatten)]
    pub department: CreateDepartment,
    #[serde(default)]
    pub destinations: Vec<CreateDepartmentDestination>,
}

impl SeedData {
    /// The content shipped with the crate (`data/seed.json`).
    pub fn baseline() -> Result<Self> {
        serde_json::from_str(BASELINE_JSON).context("Failed to parse baseline seed data")
    }
}

/// Rows written per entity
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SeedReport {
    pub tags: usize,
    pub destinations: usize,
    pub packages: usize,
    pub offers: usize,
    pub templates: usize,
    pub departments: usize,
    pub department_destinations: usize,
    pub testimonials: usize,
}

/// Upsert everything in `data`. Order matters: tags before the records that
/// reference them, destinations before packages, packages before offers.
pub async fn run_seed(pool: &PgPool, data: &SeedData) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for input in &data.tags {
        let tag = upsert_tag(input, pool).await.map_err(|e| seed_error("tag", &input.name, e))?;
        debug!(slug = %tag.slug, "Seeded tag");
        report.tags += 1;
    }

    for seed in &data.destinations {
        let mut input = seed.destination.clone();
        input.tag_ids = tag_ids(&seed.tags, pool).await?;
        let destination = upsert_destination(&input, pool)
            .await
            .map_err(|e| seed_error("destination", &input.name, e))?;
        debug!(slug = %destination.slug, "Seeded destination");
        report.destinations += 1;
    }

    for seed in &data.packages {
        let mut input = seed.package.clone();
        input.tag_ids = tag_ids(&seed.tags, pool).await?;
        let package = upsert_package(&input, pool)
            .await
            .map_err(|e| seed_error("package", &input.title, e))?;
        debug!(slug = %package.slug, "Seeded package");
        report.packages += 1;
    }

    for input in &data.offers {
        let offer = upsert_offer(input, pool)
            .await
            .map_err(|e| seed_error("offer", &input.title, e))?;
        debug!(slug = %offer.slug, "Seeded offer");
        report.offers += 1;
    }

    for input in &data.templates {
        let template = upsert_template(input, pool)
            .await
            .map_err(|e| seed_error("template", &input.name, e))?;
        debug!(slug = %template.slug, "Seeded WhatsApp template");
        report.templates += 1;
    }

    for seed in &data.departments {
        let department = upsert_department(&seed.department, pool)
            .await
            .map_err(|e| seed_error("department", &seed.department.name, e))?;
        report.departments += 1;

        if seed.destinations.is_empty() {
            continue;
        }
        let kind = DepartmentKind::from_department_slug(&department.slug).ok_or_else(|| {
            anyhow!(
                "Department '{}' does not list destinations (expected weddings or quinceanera)",
                department.slug
            )
        })?;
        for input in &seed.destinations {
            upsert_department_destination(kind, input, pool)
                .await
                .map_err(|e| seed_error("department destination", &input.name, e))?;
            report.department_destinations += 1;
        }
    }

    for input in &data.testimonials {
        seed_testimonial(input, pool)
            .await
            .map_err(|e| seed_error("testimonial", &input.author_name, e))?;
        report.testimonials += 1;
    }

    info!(
        tags = report.tags,
        destinations = report.destinations,
        packages = report.packages,
        offers = report.offers,
        templates = report.templates,
        departments = report.departments,
        department_destinations = report.department_destinations,
        testimonials = report.testimonials,
        "Seed complete"
    );
    Ok(report)
}

/// Tag slugs must already exist (seeded above or created in the dashboard).
async fn tag_ids(slugs: &[String], pool: &PgPool) -> Result<Vec<TagId>> {
    if slugs.is_empty() {
        return Ok(Vec::new());
    }
    let tags = Tag::find_by_slugs(slugs, pool).await?;
    if let Some(missing) = slugs.iter().find(|s| !tags.iter().any(|t| &t.slug == *s)) {
        return Err(anyhow!("Unknown tag slug '{}'", missing));
    }
    Ok(tags.into_iter().map(|t| t.id).collect())
}

fn seed_error(kind: &str, name: &str, err: ApiError) -> anyhow::Error {
    match err {
        ApiError::Internal(inner) => inner.context(format!("Failed to seed {} '{}'", kind, name)),
        other => anyhow!("Failed to seed {} '{}': {}", kind, name, describe(&other)),
    }
}

fn describe(err: &ApiError) -> String {
    match err {
        ApiError::Validation(fields) => fields
            .field_names()
            .iter()
            .map(|f| format!("{} {}", f, fields.get(f).unwrap_or("is invalid")))
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
