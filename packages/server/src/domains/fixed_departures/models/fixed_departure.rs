use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{FixedDepartureId, PackageId, PageParams};
use crate::domains::packages::models::DEFAULT_CURRENCY;

/// Booking status of a departure
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DepartureStatus {
    Open,
    FewSeats,
    SoldOut,
    Cancelled,
}

/// At or below this many free seats an open departure shows as "few seats"
pub const FEW_SEATS_THRESHOLD: i32 = 5;

impl DepartureStatus {
    /// Status implied by seat counts; `cancelled` is only ever set by staff.
    pub fn from_seats(seats_available: i32) -> Self {
        if seats_available <= 0 {
            DepartureStatus::SoldOut
        } else if seats_available <= FEW_SEATS_THRESHOLD {
            DepartureStatus::FewSeats
        } else {
            DepartureStatus::Open
        }
    }

    /// Status after an edit: an explicit status wins, a cancelled departure
    /// stays cancelled, anything else follows the seats left.
    pub fn after_update(
        stored: &str,
        explicit: Option<DepartureStatus>,
        seats_available: i32,
    ) -> Self {
        match explicit {
            Some(status) => status,
            None if stored == "cancelled" => DepartureStatus::Cancelled,
            None => DepartureStatus::from_seats(seats_available),
        }
    }
}

impl std::fmt::Display for DepartureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DepartureStatus::Open => write!(f, "open"),
            DepartureStatus::FewSeats => write!(f, "few_seats"),
            DepartureStatus::SoldOut => write!(f, "sold_out"),
            DepartureStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for DepartureStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "open" => Ok(DepartureStatus::Open),
            "few_seats" => Ok(DepartureStatus::FewSeats),
            "sold_out" => Ok(DepartureStatus::SoldOut),
            "cancelled" => Ok(DepartureStatus::Cancelled),
            _ => Err(anyhow::anyhow!("Invalid departure status: {}", s)),
        }
    }
}

/// Fixed departure model. `status` is stored as text.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FixedDeparture {
    pub id: FixedDepartureId,
    pub package_id: PackageId,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub seats_total: i32,
    pub seats_available: i32,
    pub price: Option<Decimal>,
    pub currency: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Departure joined with its package for listings
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FixedDepartureWithPackage {
    #[sqlx(flatten)]
    pub departure: FixedDeparture,
    pub package_slug: String,
    pub package_title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateFixedDeparture {
    pub package_id: Option<PackageId>,
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub seats_total: Option<i32>,
    /// Defaults to `seats_total`
    pub seats_available: Option<i32>,
    pub price: Option<Decimal>,
    pub currency: Option<String>,
    /// Derived from seats when absent
    pub status: Option<DepartureStatus>,
}

impl CreateFixedDeparture {
    pub fn resolved_seats_available(&self) -> i32 {
        self.seats_available.or(self.seats_total).unwrap_or(0)
    }

    pub fn resolved_status(&self) -> DepartureStatus {
        self.status
            .unwrap_or_else(|| DepartureStatus::from_seats(self.resolved_seats_available()))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFixedDeparture {
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub seats_total: Option<i32>,
    pub seats_available: Option<i32>,
    pub price: Option<Decimal>,
    pub currency: Option<String>,
    pub status: Option<DepartureStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixedDepartureFilter {
    pub package_id: Option<PackageId>,
    /// Only departures from today on, excluding cancelled ones
    pub upcoming: Option<bool>,
    /// Admins may list departures of unpublished packages
    pub include_unpublished: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl FixedDepartureFilter {
    pub fn page(&self) -> PageParams {
        PageParams {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

const SELECT_WITH_PACKAGE: &str = r#"
    SELECT fd.*, p.slug AS package_slug, p.title AS package_title
    FROM fixed_departures fd
    INNER JOIN packages p ON p.id = fd.package_id
"#;

impl FixedDeparture {
    pub fn status(&self) -> DepartureStatus {
        self.status
            .parse()
            .unwrap_or_else(|_| DepartureStatus::from_seats(self.seats_available))
    }

    /// Departures of published packages only, soonest first
    pub async fn find_with_filters(
        filter: &FixedDepartureFilter,
        today: NaiveDate,
        include_unpublished: bool,
        pool: &PgPool,
    ) -> Result<Vec<FixedDepartureWithPackage>> {
        let page = filter.page();
        let query = format!(
            r#"{}
            WHERE ($1 OR p.published)
              AND ($2::uuid IS NULL OR fd.package_id = $2)
              AND (NOT $3 OR (fd.departure_date >= $4 AND fd.status <> 'cancelled'))
            ORDER BY fd.departure_date ASC
            LIMIT $5 OFFSET $6
            "#,
            SELECT_WITH_PACKAGE
        );
        let rows = sqlx::query_as::<_, FixedDepartureWithPackage>(&query)
            .bind(include_unpublished)
            .bind(filter.package_id)
            .bind(filter.upcoming.unwrap_or(false))
            .bind(today)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_id(
        id: FixedDepartureId,
        pool: &PgPool,
    ) -> Result<FixedDepartureWithPackage> {
        let query = format!("{} WHERE fd.id = $1", SELECT_WITH_PACKAGE);
        let row = sqlx::query_as::<_, FixedDepartureWithPackage>(&query)
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(row)
    }

    pub async fn create(
        package_id: PackageId,
        departure_date: NaiveDate,
        seats_total: i32,
        input: &CreateFixedDeparture,
        pool: &PgPool,
    ) -> Result<Self> {
        let departure = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO fixed_departures (
                id, package_id, departure_date, return_date, seats_total,
                seats_available, price, currency, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(FixedDepartureId::new())
        .bind(package_id)
        .bind(departure_date)
        .bind(input.return_date)
        .bind(seats_total)
        .bind(input.resolved_seats_available())
        .bind(input.price)
        .bind(input.currency.as_deref().unwrap_or(DEFAULT_CURRENCY))
        .bind(input.resolved_status().to_string())
        .fetch_one(pool)
        .await?;
        Ok(departure)
    }

    /// Apply a partial edit. The row is locked while the status is
    /// recomputed from the seats it will have after the edit.
    pub async fn update(
        id: FixedDepartureId,
        input: &UpdateFixedDeparture,
        pool: &PgPool,
    ) -> Result<Self> {
        let mut tx = pool.begin().await?;

        let (stored_status, stored_seats): (String, i32) = sqlx::query_as(
            "SELECT status, seats_available FROM fixed_departures WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        let status = DepartureStatus::after_update(
            &stored_status,
            input.status,
            input.seats_available.unwrap_or(stored_seats),
        );

        let departure = sqlx::query_as::<_, Self>(
            r#"
            UPDATE fixed_departures SET
                departure_date = COALESCE($2, departure_date),
                return_date = COALESCE($3, return_date),
                seats_total = COALESCE($4, seats_total),
                seats_available = COALESCE($5, seats_available),
                price = COALESCE($6, price),
                currency = COALESCE($7, currency),
                status = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.departure_date)
        .bind(input.return_date)
        .bind(input.seats_total)
        .bind(input.seats_available)
        .bind(input.price)
        .bind(&input.currency)
        .bind(status.to_string())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(departure)
    }

    pub async fn delete(id: FixedDepartureId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM fixed_departures WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_seat_count() {
        assert_eq!(DepartureStatus::from_seats(0), DepartureStatus::SoldOut);
        assert_eq!(DepartureStatus::from_seats(-2), DepartureStatus::SoldOut);
        assert_eq!(DepartureStatus::from_seats(FEW_SEATS_THRESHOLD), DepartureStatus::FewSeats);
        assert_eq!(DepartureStatus::from_seats(40), DepartureStatus::Open);
    }

    #[test]
    fn edits_recompute_status_unless_cancelled_or_explicit() {
        assert_eq!(
            DepartureStatus::after_update("open", None, 0),
            DepartureStatus::SoldOut
        );
        assert_eq!(
            DepartureStatus::after_update("sold_out", None, 12),
            DepartureStatus::Open
        );
        assert_eq!(
            DepartureStatus::after_update("cancelled", None, 12),
            DepartureStatus::Cancelled
        );
        assert_eq!(
            DepartureStatus::after_update("open", Some(DepartureStatus::Cancelled), 12),
            DepartureStatus::Cancelled
        );
    }

    #[test]
    fn create_defaults_available_seats_to_total() {
        let input = CreateFixedDeparture {
            seats_total: Some(3),
            ..Default::default()
        };
        assert_eq!(input.resolved_seats_available(), 3);
        assert_eq!(input.resolved_status(), DepartureStatus::FewSeats);

        let cancelled = CreateFixedDeparture {
            status: Some(DepartureStatus::Cancelled),
            ..input
        };
        assert_eq!(cancelled.resolved_status(), DepartureStatus::Cancelled);
    }

    #[test]
    fn status_text_round_trips() {
        for status in [
            DepartureStatus::Open,
            DepartureStatus::FewSeats,
            DepartureStatus::SoldOut,
            DepartureStatus::Cancelled,
        ] {
            assert_eq!(status.to_string().parse::<DepartureStatus>().unwrap(), status);
        }
    }
}
