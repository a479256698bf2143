//! Seeding is an upsert: running it twice leaves one row per slug.

mod common;

use agency_core::domains::packages::Package;
use agency_core::domains::tag::models::Tag;
use agency_core::domains::whatsapp::models::{TemplateCategory, WhatsAppTemplate};
use agency_core::seed::{run_seed, SeedData};
use test_context::test_context;

use crate::common::TestHarness;

async fn count(pool: &sqlx::PgPool, table: &str, slugs: &[String]) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {} WHERE slug = ANY($1)", table))
        .bind(slugs)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[test_context(TestHarness)]
#[tokio::test]
async fn seeding_twice_creates_no_duplicates(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let data = SeedData::baseline().unwrap();

    let first = run_seed(pool, &data).await.unwrap();
    let second = run_seed(pool, &data).await.unwrap();
    assert_eq!(first, second);

    let tag_slugs: Vec<String> = data.tags.iter().map(|t| t.resolved_slug()).collect();
    let destination_slugs: Vec<String> = data
        .destinations
        .iter()
        .map(|d| d.destination.resolved_slug())
        .collect();
    let package_slugs: Vec<String> = data.packages.iter().map(|p| p.package.resolved_slug()).collect();
    let offer_slugs: Vec<String> = data.offers.iter().map(|o| o.resolved_slug()).collect();
    let template_slugs: Vec<String> = data.templates.iter().map(|t| t.resolved_slug()).collect();
    let department_slugs: Vec<String> = data
        .departments
        .iter()
        .map(|d| d.department.resolved_slug())
        .collect();

    assert_eq!(count(pool, "tags", &tag_slugs).await, tag_slugs.len() as i64);
    assert_eq!(
        count(pool, "destinations", &destination_slugs).await,
        destination_slugs.len() as i64
    );
    assert_eq!(count(pool, "packages", &package_slugs).await, package_slugs.len() as i64);
    assert_eq!(count(pool, "offers", &offer_slugs).await, offer_slugs.len() as i64);
    assert_eq!(
        count(pool, "whatsapp_templates", &template_slugs).await,
        template_slugs.len() as i64
    );
    assert_eq!(
        count(pool, "departments", &department_slugs).await,
        department_slugs.len() as i64
    );

    for testimonial in &data.testimonials {
        let n: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM testimonials WHERE author_name = $1 AND body = $2",
        )
        .bind(&testimonial.author_name)
        .bind(&testimonial.body)
        .fetch_one(pool)
        .await
        .unwrap();
        assert_eq!(n, 1, "{}", testimonial.author_name);
    }

    // Join rows are replaced, not appended
    let seeded = &data.packages[0];
    let package_id: agency_core::common::PackageId =
        sqlx::query_scalar("SELECT id FROM packages WHERE slug = $1")
            .bind(seeded.package.resolved_slug())
            .fetch_one(pool)
            .await
            .unwrap();
    let tags = Tag::find_for_package(package_id, pool).await.unwrap();
    assert_eq!(tags.len(), seeded.tags.len());

    let general = WhatsAppTemplate::find_default(TemplateCategory::General, pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(general.slug, "general");

    assert!(Package::count(pool).await.unwrap() >= package_slugs.len() as i64);
}
