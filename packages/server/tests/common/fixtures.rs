//! Test fixtures for creating test data.
//!
//! These fixtures go through the model methods directly. Slugs carry a
//! random suffix because tests share one database.

use agency_core::domains::destinations::{CreateDestination, Destination};
use agency_core::domains::packages::{CreatePackage, Package};
use agency_core::domains::tag::models::Tag;
use anyhow::Result;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// `prefix-<8 hex chars>`
pub fn unique_slug(prefix: &str) -> String {
    format!("{}-{}", prefix, &Uuid::new_v4().simple().to_string()[..8])
}

pub async fn create_test_tag(pool: &PgPool, prefix: &str) -> Result<Tag> {
    let slug = unique_slug(prefix);
    Tag::create(&slug, prefix, pool).await
}

pub async fn create_test_destination(pool: &PgPool, name: &str) -> Result<Destination> {
    let input = CreateDestination {
        name: name.to_string(),
        published: true,
        ..Default::default()
    };
    Destination::create(&unique_slug("dest"), &input, pool).await
}

pub async fn create_test_package(pool: &PgPool, title: &str, published: bool) -> Result<Package> {
    let input = CreatePackage {
        title: title.to_string(),
        duration_days: Some(5),
        price_from: Some(Decimal::new(1250000, 2)),
        published,
        ..Default::default()
    };
    Package::create(&unique_slug("pkg"), &input, None, false, pool).await
}
