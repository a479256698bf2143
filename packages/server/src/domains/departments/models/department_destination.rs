use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{DepartmentDestinationId, PageParams};
use crate::server::Visibility;

/// Which venue table a department's destinations live in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DepartmentKind {
    Wedding,
    Quinceanera,
}

impl DepartmentKind {
    /// Resolve from the department slug used in URLs
    pub fn from_department_slug(slug: &str) -> Option<Self> {
        match slug {
            "weddings" | "bodas" => Some(DepartmentKind::Wedding),
            "quinceanera" | "xv-anos" => Some(DepartmentKind::Quinceanera),
            _ => None,
        }
    }

    fn table(&self) -> &'static str {
        match self {
            DepartmentKind::Wedding => "wedding_destinations",
            DepartmentKind::Quinceanera => "quinceanera_destinations",
        }
    }
}

impl std::fmt::Display for DepartmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DepartmentKind::Wedding => write!(f, "wedding"),
            DepartmentKind::Quinceanera => write!(f, "quinceanera"),
        }
    }
}

impl std::str::FromStr for DepartmentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "wedding" => Ok(DepartmentKind::Wedding),
            "quinceanera" => Ok(DepartmentKind::Quinceanera),
            _ => Err(anyhow::anyhow!("Invalid department kind: {}", s)),
        }
    }
}

/// Wedding or quinceañera venue; both tables share this shape
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DepartmentDestination {
    pub id: DepartmentDestinationId,
    pub slug: String,
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub gallery: Vec<String>,
    pub price_from: Option<Decimal>,
    pub capacity: Option<i32>,
    pub featured: bool,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateDepartmentDestination {
    pub slug: Option<String>,
    #[serde(default)]
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
    pub price_from: Option<Decimal>,
    pub capacity: Option<i32>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_published")]
    pub published: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDepartmentDestination {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub gallery: Option<Vec<String>>,
    pub price_from: Option<Decimal>,
    pub capacity: Option<i32>,
    pub featured: Option<bool>,
    pub published: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepartmentDestinationFilter {
    pub featured: Option<bool>,
    pub include_unpublished: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl DepartmentDestinationFilter {
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

impl DepartmentDestination {
    pub async fn find_with_filters(
        kind: DepartmentKind,
        filter: &DepartmentDestinationFilter,
        visibility: Visibility,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let page = filter.page();
        let query = format!(
            r#"
            SELECT * FROM {}
            WHERE ($1 OR published)
              AND ($2::bool IS NULL OR featured = $2)
            ORDER BY featured DESC, name ASC
            LIMIT $3 OFFSET $4
            "#,
            kind.table()
        );
        let rows = sqlx::query_as::<_, Self>(&query)
            .bind(visibility.include_unpublished())
            .bind(filter.featured)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_id(
        kind: DepartmentKind,
        id: DepartmentDestinationId,
        pool: &PgPool,
    ) -> Result<Self> {
        let query = format!("SELECT * FROM {} WHERE id = $1", kind.table());
        let row = sqlx::query_as::<_, Self>(&query)
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(row)
    }

    pub async fn find_by_slug(
        kind: DepartmentKind,
        slug: &str,
        visibility: Visibility,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let query = format!(
            "SELECT * FROM {} WHERE slug = $1 AND ($2 OR published)",
            kind.table()
        );
        let row = sqlx::query_as::<_, Self>(&query)
            .bind(slug)
            .bind(visibility.include_unpublished())
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn create(
        kind: DepartmentKind,
        slug: &str,
        input: &CreateDepartmentDestination,
        upsert: bool,
        pool: &PgPool,
    ) -> Result<Self> {
        let conflict = if upsert {
            r#"ON CONFLICT (slug) DO UPDATE SET
                name = EXCLUDED.name,
                location = EXCLUDED.location,
                description = EXCLUDED.description,
                image_url = EXCLUDED.image_url,
                gallery = EXCLUDED.gallery,
                price_from = EXCLUDED.price_from,
                capacity = EXCLUDED.capacity,
                featured = EXCLUDED.featured,
                published = EXCLUDED.published,
                updated_at = NOW()"#
        } else {
            ""
        };
        let query = format!(
            r#"
            INSERT INTO {} (
                id, slug, name, location, description, image_url, gallery,
                price_from, capacity, featured, published
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            {}
            RETURNING *
            "#,
            kind.table(),
            conflict
        );
        let row = sqlx::query_as::<_, Self>(&query)
            .bind(DepartmentDestinationId::new())
            .bind(slug)
            .bind(input.name.trim())
            .bind(&input.location)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(&input.gallery)
            .bind(input.price_from)
            .bind(input.capacity)
            .bind(input.featured)
            .bind(input.published)
            .fetch_one(pool)
            .await?;
        Ok(row)
    }

    pub async fn update(
        kind: DepartmentKind,
        id: DepartmentDestinationId,
        input: &UpdateDepartmentDestination,
        pool: &PgPool,
    ) -> Result<Self> {
        let query = format!(
            r#"
            UPDATE {} SET
                slug = COALESCE($2, slug),
                name = COALESCE($3, name),
                location = COALESCE($4, location),
                description = COALESCE($5, description),
                image_url = COALESCE($6, image_url),
                gallery = COALESCE($7, gallery),
                price_from = COALESCE($8, price_from),
                capacity = COALESCE($9, capacity),
                featured = COALESCE($10, featured),
                published = COALESCE($11, published),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
            kind.table()
        );
        let row = sqlx::query_as::<_, Self>(&query)
            .bind(id)
            .bind(&input.slug)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.location)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(&input.gallery)
            .bind(input.price_from)
            .bind(input.capacity)
            .bind(input.featured)
            .bind(input.published)
            .fetch_one(pool)
            .await?;
        Ok(row)
    }

    pub async fn delete(
        kind: DepartmentKind,
        id: DepartmentDestinationId,
        pool: &PgPool,
    ) -> Result<bool> {
        let query = format!("DELETE FROM {} WHERE id = $1", kind.table());
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn department_slugs_map_to_tables() {
        assert_eq!(
            DepartmentKind::from_department_slug("weddings").map(|k| k.table()),
            Some("wedding_destinations")
        );
        assert_eq!(
            DepartmentKind::from_department_slug("quinceanera").map(|k| k.table()),
            Some("quinceanera_destinations")
        );
        assert_eq!(DepartmentKind::from_department_slug("cruceros"), None);
    }

    #[test]
    fn kind_round_trips_through_its_name() {
        for kind in [DepartmentKind::Wedding, DepartmentKind::Quinceanera] {
            assert_eq!(kind.to_string().parse::<DepartmentKind>().unwrap(), kind);
        }
        assert!("boda".parse::<DepartmentKind>().is_err());
    }
}
