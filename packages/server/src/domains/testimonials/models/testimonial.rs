use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{PageParams, TestimonialId};
use crate::server::Visibility;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Testimonial {
    pub id: TestimonialId,
    pub author_name: String,
    pub location: Option<String>,
    pub body: String,
    pub rating: i32,
    pub image_url: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTestimonial {
    #[serde(default)]
    pub author_name: String,
    pub location: Option<String>,
    #[serde(default)]
    pub body: String,
    pub rating: Option<i32>,
    pub image_url: Option<String>,
    #[serde(default = "default_published")]
    pub published: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTestimonial {
    pub author_name: Option<String>,
    pub location: Option<String>,
    pub body: Option<String>,
    pub rating: Option<i32>,
    pub image_url: Option<String>,
    pub published: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestimonialFilter {
    pub min_rating: Option<i32>,
    pub include_unpublished: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl TestimonialFilter {
    pub fn page(&self) -> PageParams {
        PageParams {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

pub const DEFAULT_RATING: i32 = 5;

fn default_published() -> bool {
    true
}

impl Testimonial {
    pub async fn find_with_filters(
        filter: &TestimonialFilter,
        visibility: Visibility,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let page = filter.page();
        let testimonials = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM testimonials
            WHERE ($1 OR published)
              AND ($2::int IS NULL OR rating >= $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(visibility.include_unpublished())
        .bind(filter.min_rating)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;
        Ok(testimonials)
    }

    pub async fn find_by_id(id: TestimonialId, pool: &PgPool) -> Result<Self> {
        let testimonial =
            sqlx::query_as::<_, Self>("SELECT * FROM testimonials WHERE id = $1")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(testimonial)
    }

    pub async fn create(input: &CreateTestimonial, pool: &PgPool) -> Result<Self> {
        let testimonial = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO testimonials (id, author_name, location, body, rating, image_url, published)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(TestimonialId::new())
        .bind(input.author_name.trim())
        .bind(&input.location)
        .bind(input.body.trim())
        .bind(input.rating.unwrap_or(DEFAULT_RATING))
        .bind(&input.image_url)
        .bind(input.published)
        .fetch_one(pool)
        .await?;
        Ok(testimonial)
    }

    /// Testimonials have no slug; the seed keys them on author + body.
    pub async fn create_if_missing(input: &CreateTestimonial, pool: &PgPool) -> Result<Self> {
        let existing = sqlx::query_as::<_, Self>(
            "SELECT * FROM testimonials WHERE author_name = $1 AND body = $2 LIMIT 1",
        )
        .bind(input.author_name.trim())
        .bind(input.body.trim())
        .fetch_optional(pool)
        .await?;

        match existing {
            Some(testimonial) => Ok(testimonial),
            None => Self::create(input, pool).await,
        }
    }

    pub async fn update(id: TestimonialId, input: &UpdateTestimonial, pool: &PgPool) -> Result<Self> {
        let testimonial = sqlx::query_as::<_, Self>(
            r#"
            UPDATE testimonials SET
                author_name = COALESCE($2, author_name),
                location = COALESCE($3, location),
                body = COALESCE($4, body),
                rating = COALESCE($5, rating),
                image_url = COALESCE($6, image_url),
                published = COALESCE($7, published),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.author_name.as_deref().map(str::trim))
        .bind(&input.location)
        .bind(input.body.as_deref().map(str::trim))
        .bind(input.rating)
        .bind(&input.image_url)
        .bind(input.published)
        .fetch_one(pool)
        .await?;
        Ok(testimonial)
    }

    pub async fn delete(id: TestimonialId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM testimonials")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
