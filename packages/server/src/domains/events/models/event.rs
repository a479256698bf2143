use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{EventId, PageParams};
use crate::server::Visibility;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Event {
    pub id: EventId,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub price: Option<Decimal>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Not over yet: single-point events end when they start.
    pub fn is_upcoming_at(&self, now: DateTime<Utc>) -> bool {
        self.ends_at.unwrap_or(self.starts_at) >= now
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateEvent {
    pub slug: Option<String>,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    /// Required; kept optional so a missing value reports as a field error
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub price: Option<Decimal>,
    #[serde(default = "default_published")]
    pub published: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEvent {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub price: Option<Decimal>,
    pub published: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventFilter {
    pub upcoming: Option<bool>,
    pub include_unpublished: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl EventFilter {
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

impl Event {
    pub async fn find_by_id(id: EventId, pool: &PgPool) -> Result<Self> {
        let event = sqlx::query_as::<_, Self>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(event)
    }

    pub async fn find_by_slug(
        slug: &str,
        visibility: Visibility,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let event = sqlx::query_as::<_, Self>(
            "SELECT * FROM events WHERE slug = $1 AND ($2 OR published)",
        )
        .bind(slug)
        .bind(visibility.include_unpublished())
        .fetch_optional(pool)
        .await?;
        Ok(event)
    }

    /// Soonest first
    pub async fn find_with_filters(
        filter: &EventFilter,
        now: DateTime<Utc>,
        visibility: Visibility,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let page = filter.page();
        let events = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM events
            WHERE ($1 OR published)
              AND (NOT $2 OR COALESCE(ends_at, starts_at) >= $3)
            ORDER BY starts_at ASC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(visibility.include_unpublished())
        .bind(filter.upcoming.unwrap_or(false))
        .bind(now)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;
        Ok(events)
    }

    pub async fn create(
        slug: &str,
        input: &CreateEvent,
        starts_at: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<Self> {
        let event = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO events (
                id, slug, title, description, location, starts_at, ends_at,
                image_url, price, published
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(EventId::new())
        .bind(slug)
        .bind(input.title.trim())
        .bind(&input.description)
        .bind(&input.location)
        .bind(starts_at)
        .bind(input.ends_at)
        .bind(&input.image_url)
        .bind(input.price)
        .bind(input.published)
        .fetch_one(pool)
        .await?;
        Ok(event)
    }

    pub async fn update(id: EventId, input: &UpdateEvent, pool: &PgPool) -> Result<Self> {
        let event = sqlx::query_as::<_, Self>(
            r#"
            UPDATE events SET
                slug = COALESCE($2, slug),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                location = COALESCE($5, location),
                starts_at = COALESCE($6, starts_at),
                ends_at = COALESCE($7, ends_at),
                image_url = COALESCE($8, image_url),
                price = COALESCE($9, price),
                published = COALESCE($10, published),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.slug)
        .bind(input.title.as_deref().map(str::trim))
        .bind(&input.description)
        .bind(&input.location)
        .bind(input.starts_at)
        .bind(input.ends_at)
        .bind(&input.image_url)
        .bind(input.price)
        .bind(input.published)
        .fetch_one(pool)
        .await?;
        Ok(event)
    }

    pub async fn delete(id: EventId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
