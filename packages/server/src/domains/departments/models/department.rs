use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::DepartmentId;
use crate::server::Visibility;

/// Department model - a themed landing section with hero content
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Department {
    pub id: DepartmentId,
    pub slug: String,
    pub name: String,

    // Hero
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub hero_image_url: Option<String>,

    pub description: Option<String>,
    pub services: Vec<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateDepartment {
    pub slug: Option<String>,
    #[serde(default)]
    pub name: String,
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub hero_image_url: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default = "default_published")]
    pub published: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDepartment {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub hero_image_url: Option<String>,
    pub description: Option<String>,
    pub services: Option<Vec<String>>,
    pub published: Option<bool>,
}

fn default_published() -> bool {
    true
}

impl Department {
    pub async fn find_all(visibility: Visibility, pool: &PgPool) -> Result<Vec<Self>> {
        let departments = sqlx::query_as::<_, Self>(
            "SELECT * FROM departments WHERE ($1 OR published) ORDER BY name",
        )
        .bind(visibility.include_unpublished())
        .fetch_all(pool)
        .await?;
        Ok(departments)
    }

    pub async fn find_by_id(id: DepartmentId, pool: &PgPool) -> Result<Self> {
        let department = sqlx::query_as::<_, Self>("SELECT * FROM departments WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(department)
    }

    pub async fn find_by_slug(
        slug: &str,
        visibility: Visibility,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let department = sqlx::query_as::<_, Self>(
            "SELECT * FROM departments WHERE slug = $1 AND ($2 OR published)",
        )
        .bind(slug)
        .bind(visibility.include_unpublished())
        .fetch_optional(pool)
        .await?;
        Ok(department)
    }

    pub async fn create(
        slug: &str,
        input: &CreateDepartment,
        upsert: bool,
        pool: &PgPool,
    ) -> Result<Self> {
        let conflict = if upsert {
            r#"ON CONFLICT (slug) DO UPDATE SET
                name = EXCLUDED.name,
                hero_title = EXCLUDED.hero_title,
                hero_subtitle = EXCLUDED.hero_subtitle,
                hero_image_url = EXCLUDED.hero_image_url,
                description = EXCLUDED.description,
                services = EXCLUDED.services,
                published = EXCLUDED.published,
                updated_at = NOW()"#
        } else {
            ""
        };
        let query = format!(
            r#"
            INSERT INTO departments (
                id, slug, name, hero_title, hero_subtitle, hero_image_url,
                description, services, published
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            {}
            RETURNING *
            "#,
            conflict
        );
        let department = sqlx::query_as::<_, Self>(&query)
            .bind(DepartmentId::new())
            .bind(slug)
            .bind(input.name.trim())
            .bind(&input.hero_title)
            .bind(&input.hero_subtitle)
            .bind(&input.hero_image_url)
            .bind(&input.description)
            .bind(&input.services)
            .bind(input.published)
            .fetch_one(pool)
            .await?;
        Ok(department)
    }

    pub async fn update(id: DepartmentId, input: &UpdateDepartment, pool: &PgPool) -> Result<Self> {
        let department = sqlx::query_as::<_, Self>(
            r#"
            UPDATE departments SET
                slug = COALESCE($2, slug),
                name = COALESCE($3, name),
                hero_title = COALESCE($4, hero_title),
                hero_subtitle = COALESCE($5, hero_subtitle),
                hero_image_url = COALESCE($6, hero_image_url),
                description = COALESCE($7, description),
                services = COALESCE($8, services),
                published = COALESCE($9, published),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.slug)
        .bind(input.name.as_deref().map(str::trim))
        .bind(&input.hero_title)
        .bind(&input.hero_subtitle)
        .bind(&input.hero_image_url)
        .bind(&input.description)
        .bind(&input.services)
        .bind(input.published)
        .fetch_one(pool)
        .await?;
        Ok(department)
    }

    pub async fn delete(id: DepartmentId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
