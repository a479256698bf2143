use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{DestinationId, PageParams, TagId};
use crate::server::Visibility;

/// Destination model - a country, city or region shown on the site
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Destination {
    pub id: DestinationId,
    pub slug: String,
    pub name: String,
    pub country: Option<String>,
    pub region: Option<String>, // 'caribe', 'europa', 'nacional', ...
    pub summary: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub gallery: Vec<String>,
    pub featured: bool,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin form payload for a new destination
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateDestination {
    pub slug: Option<String>,
    #[serde(default)]
    pub name: String,
    pub country: Option<String>,
    pub region: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_published")]
    pub published: bool,
    #[serde(default)]
    pub tag_ids: Vec<TagId>,
}

/// Admin PATCH payload; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDestination {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub gallery: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub published: Option<bool>,
    /// Replaces the whole tag set when present
    pub tag_ids: Option<Vec<TagId>>,
}

/// List query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DestinationFilter {
    pub featured: Option<bool>,
    pub region: Option<String>,
    pub tag: Option<String>,
    pub q: Option<String>,
    pub include_unpublished: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl DestinationFilter {
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

impl Destination {
    pub async fn find_by_id(id: DestinationId, pool: &PgPool) -> Result<Self> {
        let destination =
            sqlx::query_as::<_, Self>("SELECT * FROM destinations WHERE id = $1")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(destination)
    }

    pub async fn find_by_slug(
        slug: &str,
        visibility: Visibility,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let destination = sqlx::query_as::<_, Self>(
            "SELECT * FROM destinations WHERE slug = $1 AND ($2 OR published)",
        )
        .bind(slug)
        .bind(visibility.include_unpublished())
        .fetch_optional(pool)
        .await?;
        Ok(destination)
    }

    /// Find destinations with optional filters, featured first
    pub async fn find_with_filters(
        filter: &DestinationFilter,
        visibility: Visibility,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let page = filter.page();
        let destinations = sqlx::query_as::<_, Self>(
            r#"
            SELECT d.* FROM destinations d
            WHERE ($1 OR d.published)
              AND ($2::bool IS NULL OR d.featured = $2)
              AND ($3::text IS NULL OR d.region ILIKE $3)
              AND ($4::text IS NULL OR EXISTS (
                    SELECT 1 FROM destination_tags dt
                    INNER JOIN tags t ON t.id = dt.tag_id
                    WHERE dt.destination_id = d.id AND t.slug = $4
              ))
              AND ($5::text IS NULL OR d.name ILIKE '%' || $5 || '%')
            ORDER BY d.featured DESC, d.name ASC
            LIMIT $6 OFFSET $7
            "#,
        )
        .bind(visibility.include_unpublished())
        .bind(filter.featured)
        .bind(filter.region.as_deref())
        .bind(filter.tag.as_deref())
        .bind(filter.q.as_deref().map(str::trim).filter(|q| !q.is_empty()))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;
        Ok(destinations)
    }

    pub async fn create(slug: &str, input: &CreateDestination, pool: &PgPool) -> Result<Self> {
        let destination = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO destinations (
                id, slug, name, country, region, summary, description,
                image_url, gallery, featured, published
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(DestinationId::new())
        .bind(slug)
        .bind(input.name.trim())
        .bind(&input.country)
        .bind(&input.region)
        .bind(&input.summary)
        .bind(&input.description)
        .bind(&input.image_url)
        .bind(&input.gallery)
        .bind(input.featured)
        .bind(input.published)
        .fetch_one(pool)
        .await?;
        Ok(destination)
    }

    /// Seed path: insert, or overwrite the row that already has this slug
    pub async fn upsert(slug: &str, input: &CreateDestination, pool: &PgPool) -> Result<Self> {
        let destination = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO destinations (
                id, slug, name, country, region, summary, description,
                image_url, gallery, featured, published
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (slug) DO UPDATE SET
                name = EXCLUDED.name,
                country = EXCLUDED.country,
                region = EXCLUDED.region,
                summary = EXCLUDED.summary,
                description = EXCLUDED.description,
                image_url = EXCLUDED.image_url,
                gallery = EXCLUDED.gallery,
                featured = EXCLUDED.featured,
                published = EXCLUDED.published,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(DestinationId::new())
        .bind(slug)
        .bind(input.name.trim())
        .bind(&input.country)
        .bind(&input.region)
        .bind(&input.summary)
        .bind(&input.description)
        .bind(&input.image_url)
        .bind(&input.gallery)
        .bind(input.featured)
        .bind(input.published)
        .fetch_one(pool)
        .await?;
        Ok(destination)
    }

    pub async fn update(id: DestinationId, input: &UpdateDestination, pool: &PgPool) -> Result<Self> {
        let destination = sqlx::query_as::<_, Self>(
            r#"
            UPDATE destinations SET
                slug = COALESCE($2, slug),
                name = COALESCE($3, name),
                country = COALESCE($4, country),
                region = COALESCE($5, region),
                summary = COALESCE($6, summary),
                description = COALESCE($7, description),
                image_url = COALESCE($8, image_url),
                gallery = COALESCE($9, gallery),
                featured = COALESCE($10, featured),
                published = COALESCE($11, published),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.slug)
        .bind(input.name.as_deref().map(str::trim))
        .bind(&input.country)
        .bind(&input.region)
        .bind(&input.summary)
        .bind(&input.description)
        .bind(&input.image_url)
        .bind(&input.gallery)
        .bind(input.featured)
        .bind(input.published)
        .fetch_one(pool)
        .await?;
        Ok(destination)
    }

    /// Delete a destination. Packages and offers keep existing with the link cleared.
    pub async fn delete(id: DestinationId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM destinations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_id_by_slug(slug: &str, pool: &PgPool) -> Result<Option<DestinationId>> {
        let id =
            sqlx::query_scalar::<_, DestinationId>("SELECT id FROM destinations WHERE slug = $1")
                .bind(slug)
                .fetch_optional(pool)
                .await?;
        Ok(id)
    }

    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM destinations")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
