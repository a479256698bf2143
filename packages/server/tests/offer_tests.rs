//! Active-offer filtering against a real Postgres.

mod common;

use agency_core::domains::offers::{CreateOffer, Offer, OfferFilter};
use agency_core::server::Visibility;
use axum::http::StatusCode;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use test_context::test_context;

use crate::common::{create_test_package, get, unique_slug, TestHarness};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn offer(title: &str, from: Option<NaiveDate>, until: Option<NaiveDate>) -> CreateOffer {
    CreateOffer {
        title: title.to_string(),
        price: Some(Decimal::new(999000, 2)),
        original_price: Some(Decimal::new(1250000, 2)),
        valid_from: from,
        valid_until: until,
        published: true,
        ..Default::default()
    }
}

#[test_context(TestHarness)]
#[tokio::test]
async fn active_filter_uses_validity_window(ctx: &TestHarness) {
    let package = create_test_package(&ctx.db_pool, "Cancún", true).await.unwrap();
    let today = date(2026, 6, 15);

    let cases = [
        ("expired", Some(date(2026, 1, 1)), Some(date(2026, 6, 14)), false),
        ("future", Some(date(2026, 6, 16)), Some(date(2026, 12, 31)), false),
        ("current", Some(date(2026, 6, 1)), Some(date(2026, 6, 30)), true),
        ("ends-today", None, Some(today), true),
        ("open-ended", Some(today), None, true),
    ];

    for (name, from, until, _) in &cases {
        Offer::create(
            &unique_slug(name),
            &offer(name, *from, *until),
            Some(package.id),
            None,
            false,
            &ctx.db_pool,
        )
        .await
        .unwrap();
    }

    let filter = OfferFilter {
        active: Some(true),
        package_id: Some(package.id),
        ..Default::default()
    };
    let mut active: Vec<String> =
        Offer::find_with_filters(&filter, today, Visibility::public(), &ctx.db_pool)
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.title)
            .collect();
    active.sort();

    let mut expected: Vec<String> = cases
        .iter()
        .filter(|(_, _, _, active)| *active)
        .map(|(name, ..)| name.to_string())
        .collect();
    expected.sort();
    assert_eq!(active, expected);

    let all = OfferFilter {
        package_id: Some(package.id),
        ..Default::default()
    };
    let everything = Offer::find_with_filters(&all, today, Visibility::public(), &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(everything.len(), cases.len());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn offer_payload_reports_discount_and_activity(ctx: &TestHarness) {
    let package = create_test_package(&ctx.db_pool, "Oaxaca", true).await.unwrap();
    let created = Offer::create(
        &unique_slug("preventa"),
        &offer("Preventa", None, None),
        Some(package.id),
        None,
        false,
        &ctx.db_pool,
    )
    .await
    .unwrap();

    let res = get(&ctx.app(), &format!("/api/offers/{}", created.id), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["discount_percent"], 20);
    assert_eq!(res.body["is_active"], true);
    assert_eq!(res.body["currency"], "MXN");

    let listed = get(
        &ctx.app(),
        &format!("/api/offers?active=true&package_id={}", package.id),
        None,
    )
    .await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);
}
