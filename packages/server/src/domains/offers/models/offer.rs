use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{DestinationId, OfferId, PackageId, PageParams};
use crate::domains::packages::models::DEFAULT_CURRENCY;
use crate::server::Visibility;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Offer {
    pub id: OfferId,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub original_price: Option<Decimal>,
    pub currency: String,
    pub valid_from: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub package_id: Option<PackageId>,
    pub destination_id: Option<DestinationId>,
    pub image_url: Option<String>,
    pub pdf_url: Option<String>,
    pub featured: bool,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Offer {
    /// Inside its validity window on `today` (open-ended on either side)
    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        self.valid_from.map_or(true, |from| from <= today)
            && self.valid_until.map_or(true, |until| until >= today)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOffer {
    pub slug: Option<String>,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub original_price: Option<Decimal>,
    pub currency: Option<String>,
    pub valid_from: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub package_id: Option<PackageId>,
    pub destination_id: Option<DestinationId>,
    /// Seed files refer to related records by slug
    pub package_slug: Option<String>,
    pub destination_slug: Option<String>,
    pub image_url: Option<String>,
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_published")]
    pub published: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOffer {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub original_price: Option<Decimal>,
    pub currency: Option<String>,
    pub valid_from: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub package_id: Option<PackageId>,
    pub destination_id: Option<DestinationId>,
    pub image_url: Option<String>,
    pub pdf_url: Option<String>,
    pub featured: Option<bool>,
    pub published: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfferFilter {
    /// Only offers whose validity window contains today
    pub active: Option<bool>,
    pub featured: Option<bool>,
    pub package_id: Option<PackageId>,
    pub destination_id: Option<DestinationId>,
    pub include_unpublished: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl OfferFilter {
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

impl Offer {
    pub async fn find_by_id(id: OfferId, pool: &PgPool) -> Result<Self> {
        let offer = sqlx::query_as::<_, Self>("SELECT * FROM offers WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(offer)
    }

    pub async fn find_by_slug(
        slug: &str,
        visibility: Visibility,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let offer = sqlx::query_as::<_, Self>(
            "SELECT * FROM offers WHERE slug = $1 AND ($2 OR published)",
        )
        .bind(slug)
        .bind(visibility.include_unpublished())
        .fetch_optional(pool)
        .await?;
        Ok(offer)
    }

    /// List offers; `today` anchors the `active` filter.
    pub async fn find_with_filters(
        filter: &OfferFilter,
        today: NaiveDate,
        visibility: Visibility,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let page = filter.page();
        let offers = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM offers
            WHERE ($1 OR published)
              AND (NOT $2 OR (
                    (valid_from IS NULL OR valid_from <= $3)
                AND (valid_until IS NULL OR valid_until >= $3)
              ))
              AND ($4::bool IS NULL OR featured = $4)
              AND ($5::uuid IS NULL OR package_id = $5)
              AND ($6::uuid IS NULL OR destination_id = $6)
            ORDER BY featured DESC, valid_until ASC NULLS LAST, created_at DESC
            LIMIT $7 OFFSET $8
            "#,
        )
        .bind(visibility.include_unpublished())
        .bind(filter.active.unwrap_or(false))
        .bind(today)
        .bind(filter.featured)
        .bind(filter.package_id)
        .bind(filter.destination_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;
        Ok(offers)
    }

    pub async fn create(
        slug: &str,
        input: &CreateOffer,
        package_id: Option<PackageId>,
        destination_id: Option<DestinationId>,
        upsert: bool,
        pool: &PgPool,
    ) -> Result<Self> {
        let conflict = if upsert {
            r#"ON CONFLICT (slug) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                price = EXCLUDED.price,
                original_price = EXCLUDED.original_price,
                currency = EXCLUDED.currency,
                valid_from = EXCLUDED.valid_from,
                valid_until = EXCLUDED.valid_until,
                package_id = EXCLUDED.package_id,
                destination_id = EXCLUDED.destination_id,
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
            INSERT INTO offers (
                id, slug, title, description, price, original_price, currency,
                valid_from, valid_until, package_id, destination_id,
                image_url, pdf_url, featured, published
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            {}
            RETURNING *
            "#,
            conflict
        );
        let offer = sqlx::query_as::<_, Self>(&query)
            .bind(OfferId::new())
            .bind(slug)
            .bind(input.title.trim())
            .bind(&input.description)
            .bind(input.price)
            .bind(input.original_price)
            .bind(input.currency.as_deref().unwrap_or(DEFAULT_CURRENCY))
            .bind(input.valid_from)
            .bind(input.valid_until)
            .bind(package_id)
            .bind(destination_id)
            .bind(&input.image_url)
            .bind(&input.pdf_url)
            .bind(input.featured)
            .bind(input.published)
            .fetch_one(pool)
            .await?;
        Ok(offer)
    }

    pub async fn update(id: OfferId, input: &UpdateOffer, pool: &PgPool) -> Result<Self> {
        let offer = sqlx::query_as::<_, Self>(
            r#"
            UPDATE offers SET
                slug = COALESCE($2, slug),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                original_price = COALESCE($6, original_price),
                currency = COALESCE($7, currency),
                valid_from = COALESCE($8, valid_from),
                valid_until = COALESCE($9, valid_until),
                package_id = COALESCE($10, package_id),
                destination_id = COALESCE($11, destination_id),
                image_url = COALESCE($12, image_url),
                pdf_url = COALESCE($13, pdf_url),
                featured = COALESCE($14, featured),
                published = COALESCE($15, published),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.slug)
        .bind(input.title.as_deref().map(str::trim))
        .bind(&input.description)
        .bind(input.price)
        .bind(input.original_price)
        .bind(&input.currency)
        .bind(input.valid_from)
        .bind(input.valid_until)
        .bind(input.package_id)
        .bind(input.destination_id)
        .bind(&input.image_url)
        .bind(&input.pdf_url)
        .bind(input.featured)
        .bind(input.published)
        .fetch_one(pool)
        .await?;
        Ok(offer)
    }

    pub async fn delete(id: OfferId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM offers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM offers")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(from: Option<NaiveDate>, until: Option<NaiveDate>) -> Offer {
        Offer {
            id: OfferId::new(),
            slug: "verano".to_string(),
            title: "Verano".to_string(),
            description: None,
            price: None,
            original_price: None,
            currency: "MXN".to_string(),
            valid_from: from,
            valid_until: until,
            package_id: None,
            destination_id: None,
            image_url: None,
            pdf_url: None,
            featured: false,
            published: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn validity_window_is_inclusive_and_open_ended() {
        let today = date(2025, 6, 15);
        assert!(offer(None, None).is_active_on(today));
        assert!(offer(Some(today), Some(today)).is_active_on(today));
        assert!(offer(None, Some(date(2025, 6, 30))).is_active_on(today));
        assert!(!offer(None, Some(date(2025, 6, 14))).is_active_on(today));
        assert!(!offer(Some(date(2025, 6, 16)), None).is_active_on(today));
    }
}
