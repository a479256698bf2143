use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{DestinationId, PackageId, PageParams, TagId};
use crate::server::Visibility;

pub const DEFAULT_CURRENCY: &str = "MXN";

/// Package model - a sellable trip
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Package {
    pub id: PackageId,
    pub slug: String,
    pub title: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub destination_id: Option<DestinationId>,
    pub duration_days: Option<i32>,
    pub price_from: Option<Decimal>,
    pub currency: String,
    pub includes: Vec<String>,
    pub image_url: Option<String>,
    pub pdf_url: Option<String>,
    pub featured: bool,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Package joined with its destination's slug and name for cards
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PackageWithDestination {
    #[sqlx(flatten)]
    pub package: Package,
    pub destination_slug: Option<String>,
    pub destination_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePackage {
    pub slug: Option<String>,
    #[serde(default)]
    pub title: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub destination_id: Option<DestinationId>,
    /// Seed files refer to destinations by slug
    pub destination_slug: Option<String>,
    pub duration_days: Option<i32>,
    pub price_from: Option<Decimal>,
    pub currency: Option<String>,
    #[serde(default)]
    pub includes: Vec<String>,
    pub image_url: Option<String>,
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_published")]
    pub published: bool,
    #[serde(default)]
    pub tag_ids: Vec<TagId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePackage {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub destination_id: Option<DestinationId>,
    pub duration_days: Option<i32>,
    pub price_from: Option<Decimal>,
    pub currency: Option<String>,
    pub includes: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub pdf_url: Option<String>,
    pub featured: Option<bool>,
    pub published: Option<bool>,
    pub tag_ids: Option<Vec<TagId>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageFilter {
    /// Destination slug
    pub destination: Option<String>,
    /// Tag slug
    pub tag: Option<String>,
    pub featured: Option<bool>,
    pub q: Option<String>,
    pub include_unpublished: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PackageFilter {
    pub fn page(&self) -> PageParams {
        PageParams {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

fn default_published() -> bool {
    true
}

const SELECT_WITH_DESTINATION: &str = r#"
    SELECT p.*, d.slug AS destination_slug, d.name AS destination_name
    FROM packages p
    LEFT JOIN destinations d ON d.id = p.destination_id
"#;

impl Package {
    pub async fn find_by_id(id: PackageId, pool: &PgPool) -> Result<PackageWithDestination> {
        let query = format!("{} WHERE p.id = $1", SELECT_WITH_DESTINATION);
        let package = sqlx::query_as::<_, PackageWithDestination>(&query)
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(package)
    }

    pub async fn find_by_slug(
        slug: &str,
        visibility: Visibility,
        pool: &PgPool,
    ) -> Result<Option<PackageWithDestination>> {
        let query = format!(
            "{} WHERE p.slug = $1 AND ($2 OR p.published)",
            SELECT_WITH_DESTINATION
        );
        let package = sqlx::query_as::<_, PackageWithDestination>(&query)
            .bind(slug)
            .bind(visibility.include_unpublished())
            .fetch_optional(pool)
            .await?;
        Ok(package)
    }

    pub async fn find_with_filters(
        filter: &PackageFilter,
        visibility: Visibility,
        pool: &PgPool,
    ) -> Result<Vec<PackageWithDestination>> {
        let page = filter.page();
        let query = format!(
            r#"{}
            WHERE ($1 OR p.published)
              AND ($2::text IS NULL OR d.slug = $2)
              AND ($3::text IS NULL OR EXISTS (
                    SELECT 1 FROM package_tags pt
                    INNER JOIN tags t ON t.id = pt.tag_id
                    WHERE pt.package_id = p.id AND t.slug = $3
              ))
              AND ($4::bool IS NULL OR p.featured = $4)
              AND ($5::text IS NULL OR p.title ILIKE '%' || $5 || '%')
            ORDER BY p.featured DESC, p.created_at DESC
            LIMIT $6 OFFSET $7
            "#,
            SELECT_WITH_DESTINATION
        );
        let packages = sqlx::query_as::<_, PackageWithDestination>(&query)
            .bind(visibility.include_unpublished())
            .bind(filter.destination.as_deref())
            .bind(filter.tag.as_deref())
            .bind(filter.featured)
            .bind(filter.q.as_deref().map(str::trim).filter(|q| !q.is_empty()))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;
        Ok(packages)
    }

    /// Insert a package. With `upsert` an existing row with the same slug is
    /// overwritten instead of raising a unique violation.
    pub async fn create(
        slug: &str,
        input: &CreatePackage,
        destination_id: Option<DestinationId>,
        upsert: bool,
        pool: &PgPool,
    ) -> Result<Self> {
        let conflict = if upsert {
            r#"ON CONFLICT (slug) DO UPDATE SET
                title = EXCLUDED.title,
                summary = EXCLUDED.summary,
                description = EXCLUDED.description,
                destination_id = EXCLUDED.destination_id,
                duration_days = EXCLUDED.duration_days,
                price_from = EXCLUDED.price_from,
                currency = EXCLUDED.currency,
                includes = EXCLUDED.includes,
                image_url = EXCLUDED.image_url,
                pdf_url = EXCLUDED.pdf_url,
                featured = EXCLUDED.featured,
                published = EXCLUDED.published,
                updated_at = NOW()"#
        } else {
            ""
        };
        let query = format!(
            r#"
            INSERT INTO packages (
                id, slug, title, summary, description, destination_id, duration_days,
                price_from, currency, includes, image_url, pdf_url, featured, published
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            {}
            RETURNING *
            "#,
            conflict
        );
        let package = sqlx::query_as::<_, Self>(&query)
            .bind(PackageId::new())
            .bind(slug)
            .bind(input.title.trim())
            .bind(&input.summary)
            .bind(&input.description)
            .bind(destination_id)
            .bind(input.duration_days)
            .bind(input.price_from)
            .bind(input.currency.as_deref().unwrap_or(DEFAULT_CURRENCY))
            .bind(&input.includes)
            .bind(&input.image_url)
            .bind(&input.pdf_url)
            .bind(input.featured)
            .bind(input.published)
            .fetch_one(pool)
            .await?;
        Ok(package)
    }

    pub async fn update(id: PackageId, input: &UpdatePackage, pool: &PgPool) -> Result<Self> {
        let package = sqlx::query_as::<_, Self>(
            r#"
            UPDATE packages SET
                slug = COALESCE($2, slug),
                title = COALESCE($3, title),
                summary = COALESCE($4, summary),
                description = COALESCE($5, description),
                destination_id = COALESCE($6, destination_id),
                duration_days = COALESCE($7, duration_days),
                price_from = COALESCE($8, price_from),
                currency = COALESCE($9, currency),
                includes = COALESCE($10, includes),
                image_url = COALESCE($11, image_url),
                pdf_url = COALESCE($12, pdf_url),
                featured = COALESCE($13, featured),
                published = COALESCE($14, published),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.slug)
        .bind(input.title.as_deref().map(str::trim))
        .bind(&input.summary)
        .bind(&input.description)
        .bind(input.destination_id)
        .bind(input.duration_days)
        .bind(input.price_from)
        .bind(&input.currency)
        .bind(&input.includes)
        .bind(&input.image_url)
        .bind(&input.pdf_url)
        .bind(input.featured)
        .bind(input.published)
        .fetch_one(pool)
        .await?;
        Ok(package)
    }

    pub async fn delete(id: PackageId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM packages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_id_by_slug(slug: &str, pool: &PgPool) -> Result<Option<PackageId>> {
        let id = sqlx::query_scalar::<_, PackageId>("SELECT id FROM packages WHERE slug = $1")
            .bind(slug)
            .fetch_optional(pool)
            .await?;
        Ok(id)
    }

    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM packages")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
