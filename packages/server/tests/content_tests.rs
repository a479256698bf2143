//! CRUD round trips against a real Postgres (testcontainers).

mod common;

use agency_core::common::utils::DEFAULT_FALLBACK_IMAGE_URL;
use agency_core::domains::tag::models::Tag;
use axum::http::StatusCode;
use serde_json::json;
use test_context::test_context;

use crate::common::{
    create_test_destination, create_test_package, create_test_tag, delete, get, patch, post,
    unique_slug, TestHarness,
};

#[test_context(TestHarness)]
#[tokio::test]
async fn destination_round_trip_with_tags(ctx: &TestHarness) {
    let app = ctx.app();
    let token = ctx.admin_token();
    let beach = create_test_tag(&ctx.db_pool, "playa").await.unwrap();
    let family = create_test_tag(&ctx.db_pool, "familiar").await.unwrap();
    let slug = unique_slug("cancun");

    let created = post(
        &app,
        "/api/destinations",
        Some(&token),
        json!({
            "slug": slug,
            "name": "Cancún",
            "region": "Caribe",
            "tag_ids": [beach.id, family.id]
        }),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    assert_eq!(created.body["tags"].as_array().unwrap().len(), 2);
    let id = created.body["id"].as_str().unwrap().to_string();

    let by_slug = get(&app, &format!("/api/destinations/slug/{}", slug), None).await;
    assert_eq!(by_slug.status, StatusCode::OK);
    assert_eq!(by_slug.body["name"], "Cancún");

    let filtered = get(&app, &format!("/api/destinations?tag={}", beach.slug), None).await;
    assert_eq!(filtered.status, StatusCode::OK);
    assert_eq!(filtered.body.as_array().unwrap().len(), 1);

    let updated = patch(
        &app,
        &format!("/api/destinations/{}", id),
        Some(&token),
        json!({ "summary": "Mar turquesa", "tag_ids": [family.id] }),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK, "{}", updated.body);
    assert_eq!(updated.body["summary"], "Mar turquesa");
    assert_eq!(updated.body["region"], "Caribe");
    let tags = updated.body["tags"].as_array().unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0]["slug"], family.slug.as_str());

    let removed = delete(&app, &format!("/api/destinations/{}", id), Some(&token)).await;
    assert_eq!(removed.status, StatusCode::NO_CONTENT);

    let gone = get(&app, &format!("/api/destinations/{}", id), None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    let again = delete(&app, &format!("/api/destinations/{}", id), Some(&token)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn duplicate_slug_is_a_conflict(ctx: &TestHarness) {
    let app = ctx.app();
    let token = ctx.admin_token();
    let slug = unique_slug("oaxaca");

    let first = post(&app, "/api/destinations", Some(&token), json!({ "slug": slug, "name": "Oaxaca" })).await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = post(&app, "/api/destinations", Some(&token), json!({ "slug": slug, "name": "Oaxaca 2" })).await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["error"], "conflict");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn drafts_are_hidden_from_visitors(ctx: &TestHarness) {
    let app = ctx.app();
    let token = ctx.admin_token();
    let title = unique_slug("borrador");
    let draft = create_test_package(&ctx.db_pool, &title, false).await.unwrap();

    let public_list = get(&app, &format!("/api/packages?q={}", title), None).await;
    assert_eq!(public_list.body.as_array().unwrap().len(), 0);

    // Staff without admin rights cannot opt in
    let staff_list = get(
        &app,
        &format!("/api/packages?q={}&include_unpublished=true", title),
        Some(&ctx.staff_token()),
    )
    .await;
    assert_eq!(staff_list.body.as_array().unwrap().len(), 0);

    let admin_list = get(
        &app,
        &format!("/api/packages?q={}&include_unpublished=true", title),
        Some(&token),
    )
    .await;
    assert_eq!(admin_list.body.as_array().unwrap().len(), 1);

    let public_detail = get(&app, &format!("/api/packages/{}", draft.id), None).await;
    assert_eq!(public_detail.status, StatusCode::NOT_FOUND);

    let admin_detail = get(&app, &format!("/api/packages/{}", draft.id), Some(&token)).await;
    assert_eq!(admin_detail.status, StatusCode::OK);
    assert_eq!(admin_detail.body["published"], false);

    let public_slug = get(&app, &format!("/api/packages/slug/{}", draft.slug), None).await;
    assert_eq!(public_slug.status, StatusCode::NOT_FOUND);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn package_links_destination_by_slug(ctx: &TestHarness) {
    let app = ctx.app();
    let token = ctx.admin_token();
    let destination = create_test_destination(&ctx.db_pool, "Madrid").await.unwrap();

    let created = post(
        &app,
        "/api/packages",
        Some(&token),
        json!({
            "title": unique_slug("Europa clásica"),
            "destination_slug": destination.slug,
            "duration_days": 15,
            "price_from": "2899.00",
            "currency": "USD"
        }),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    assert_eq!(created.body["destination"]["slug"], destination.slug.as_str());
    assert_eq!(created.body["currency"], "USD");
    assert_eq!(created.body["image_url"], "https://cdn.example.com/fallback.jpg");

    let unknown = post(
        &app,
        "/api/packages",
        Some(&token),
        json!({ "title": unique_slug("Sin destino"), "destination_slug": "no-existe" }),
    )
    .await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn placeholder_images_fall_back(ctx: &TestHarness) {
    let destination = create_test_destination(&ctx.db_pool, "Mérida").await.unwrap();
    sqlx::query("UPDATE destinations SET image_url = '1', gallery = ARRAY['null', 'https://img.example.com/a.jpg'] WHERE id = $1")
        .bind(destination.id)
        .execute(&ctx.db_pool)
        .await
        .unwrap();

    let res = get(&ctx.app(), &format!("/api/destinations/{}", destination.id), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["image_url"], "https://cdn.example.com/fallback.jpg");
    assert_eq!(res.body["gallery"], json!(["https://img.example.com/a.jpg"]));
    assert_ne!(res.body["image_url"], DEFAULT_FALLBACK_IMAGE_URL);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn replacing_package_tags_is_exact(ctx: &TestHarness) {
    let package = create_test_package(&ctx.db_pool, "Chepe", true).await.unwrap();
    let a = create_test_tag(&ctx.db_pool, "aventura").await.unwrap();
    let b = create_test_tag(&ctx.db_pool, "tren").await.unwrap();
    let c = create_test_tag(&ctx.db_pool, "montana").await.unwrap();

    Tag::replace_for_package(package.id, &[a.id, b.id], &ctx.db_pool).await.unwrap();
    Tag::replace_for_package(package.id, &[b.id, c.id, c.id], &ctx.db_pool).await.unwrap();

    let mut slugs: Vec<String> = Tag::find_for_package(package.id, &ctx.db_pool)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.slug)
        .collect();
    slugs.sort();
    let mut expected = vec![b.slug.clone(), c.slug.clone()];
    expected.sort();
    assert_eq!(slugs, expected);

    Tag::replace_for_package(package.id, &[], &ctx.db_pool).await.unwrap();
    assert!(Tag::find_for_package(package.id, &ctx.db_pool).await.unwrap().is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn fixed_departure_status_follows_seats(ctx: &TestHarness) {
    let app = ctx.app();
    let token = ctx.admin_token();
    let package = create_test_package(&ctx.db_pool, "Salida grupal", true).await.unwrap();

    let created = post(
        &app,
        "/api/fixed-departures",
        Some(&token),
        json!({
            "package_id": package.id,
            "departure_date": "2030-03-01",
            "return_date": "2030-03-08",
            "seats_total": 20,
            "seats_available": 3
        }),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    assert_eq!(created.body["status"], "few_seats");
    assert_eq!(created.body["nights"], 7);
    assert_eq!(created.body["package_slug"], package.slug.as_str());

    // Seat edits move the status with them
    let departure_uri = format!(
        "/api/fixed-departures/{}",
        created.body["id"].as_str().unwrap()
    );
    let sold_out = patch(&app, &departure_uri, Some(&token), json!({ "seats_available": 0 })).await;
    assert_eq!(sold_out.status, StatusCode::OK, "{}", sold_out.body);
    assert_eq!(sold_out.body["seats_available"], 0);
    assert_eq!(sold_out.body["status"], "sold_out");

    let reopened = patch(&app, &departure_uri, Some(&token), json!({ "seats_available": 12 })).await;
    assert_eq!(reopened.body["status"], "open");

    let cancelled = patch(&app, &departure_uri, Some(&token), json!({ "status": "cancelled" })).await;
    assert_eq!(cancelled.body["status"], "cancelled");

    let still_cancelled =
        patch(&app, &departure_uri, Some(&token), json!({ "seats_available": 4 })).await;
    assert_eq!(still_cancelled.body["status"], "cancelled");
    assert_eq!(still_cancelled.body["seats_available"], 4);

    let too_many = post(
        &app,
        "/api/fixed-departures",
        Some(&token),
        json!({
            "package_id": package.id,
            "departure_date": "2030-04-01",
            "seats_total": 10,
            "seats_available": 11
        }),
    )
    .await;
    assert_eq!(too_many.status, StatusCode::UNPROCESSABLE_ENTITY);

    let listed = get(
        &app,
        &format!("/api/fixed-departures?package_id={}&upcoming=true", package.id),
        None,
    )
    .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body.as_array().unwrap().len(), 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn blog_drafts_and_scheduled_posts_stay_private(ctx: &TestHarness) {
    let app = ctx.app();
    let token = ctx.admin_token();
    let draft_slug = unique_slug("borrador");
    let scheduled_slug = unique_slug("programado");
    let live_slug = unique_slug("publicado");

    for (slug, published_at) in [
        (&draft_slug, json!(null)),
        (&scheduled_slug, json!("2099-01-01T00:00:00Z")),
        (&live_slug, json!("2024-01-01T00:00:00Z")),
    ] {
        let res = post(
            &app,
            "/api/blog",
            Some(&token),
            json!({
                "slug": slug,
                "title": "Guía de viaje",
                "content": "Texto del artículo",
                "published_at": published_at
            }),
        )
        .await;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    }

    let draft = get(&app, &format!("/api/blog/slug/{}", draft_slug), None).await;
    assert_eq!(draft.status, StatusCode::NOT_FOUND);
    let scheduled = get(&app, &format!("/api/blog/slug/{}", scheduled_slug), None).await;
    assert_eq!(scheduled.status, StatusCode::NOT_FOUND);

    let live = get(&app, &format!("/api/blog/slug/{}", live_slug), None).await;
    assert_eq!(live.status, StatusCode::OK);
    assert_eq!(live.body["is_published"], true);
    assert_eq!(live.body["reading_minutes"], 1);

    let admin_draft = get(
        &app,
        &format!("/api/blog/slug/{}?include_unpublished=true", draft_slug),
        Some(&token),
    )
    .await;
    assert_eq!(admin_draft.status, StatusCode::OK);
    assert_eq!(admin_draft.body["is_published"], false);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn department_page_lists_its_venues(ctx: &TestHarness) {
    let app = ctx.app();
    let token = ctx.admin_token();
    let venue_slug = unique_slug("hacienda");

    let venue = post(
        &app,
        "/api/departments/weddings/destinations",
        Some(&token),
        json!({ "slug": venue_slug, "name": "Hacienda", "capacity": 200 }),
    )
    .await;
    assert_eq!(venue.status, StatusCode::CREATED, "{}", venue.body);

    let listed = get(&app, "/api/departments/weddings/destinations", None).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert!(listed
        .body
        .as_array()
        .unwrap()
        .iter()
        .any(|v| v["slug"] == venue_slug.as_str()));

    // Quinceañera venues live in their own table
    let other = get(
        &app,
        &format!("/api/departments/quinceanera/destinations/slug/{}", venue_slug),
        None,
    )
    .await;
    assert_eq!(other.status, StatusCode::NOT_FOUND);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn home_aggregates_published_sections(ctx: &TestHarness) {
    let res = get(&ctx.app(), "/api/home", None).await;

    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    for key in [
        "destinations",
        "packages",
        "offers",
        "events",
        "departments",
        "testimonials",
        "posts",
    ] {
        assert!(res.body[key].is_array(), "missing {}", key);
    }
}

#[test_context(TestHarness)]
#[tokio::test]
async fn health_reports_database_ok(ctx: &TestHarness) {
    let res = get(&ctx.app(), "/health", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["database"]["status"], "ok");
}
