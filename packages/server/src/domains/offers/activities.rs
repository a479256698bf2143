//! Offer activities

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use tracing::info;

use crate::common::{DestinationId, OfferId, PackageId, Validate};
use crate::domains::destinations::models::Destination;
use crate::domains::offers::data::OfferData;
use crate::domains::offers::models::{CreateOffer, Offer, OfferFilter, UpdateOffer};
use crate::domains::packages::models::Package;
use crate::kernel::ServerDeps;
use crate::server::{ApiError, ApiResult, Visibility};

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub async fn list_offers(
    filter: &OfferFilter,
    visibility: Visibility,
    deps: &ServerDeps,
) -> Result<Vec<OfferData>> {
    let today = today();
    let offers = Offer::find_with_filters(filter, today, visibility, &deps.db_pool).await?;
    Ok(offers
        .into_iter()
        .map(|o| OfferData::from_model(o, today, deps.fallback_image()))
        .collect())
}

pub async fn get_offer(
    id: OfferId,
    visibility: Visibility,
    deps: &ServerDeps,
) -> ApiResult<OfferData> {
    let offer = Offer::find_by_id(id, &deps.db_pool).await?;
    if !visibility.allows(offer.published) {
        return Err(ApiError::not_found("Offer"));
    }
    Ok(OfferData::from_model(offer, today(), deps.fallback_image()))
}

pub async fn get_offer_by_slug(
    slug: &str,
    visibility: Visibility,
    deps: &ServerDeps,
) -> ApiResult<OfferData> {
    let offer = Offer::find_by_slug(slug, visibility, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Offer"))?;
    Ok(OfferData::from_model(offer, today(), deps.fallback_image()))
}

/// Resolve related package / destination from ids or, failing that, slugs.
async fn resolve_links(
    input: &CreateOffer,
    pool: &PgPool,
) -> ApiResult<(Option<PackageId>, Option<DestinationId>)> {
    let package_id = match (input.package_id, input.package_slug.as_deref()) {
        (Some(id), _) => Some(id),
        (None, Some(slug)) => Some(
            Package::find_id_by_slug(slug, pool)
                .await?
                .ok_or_else(|| ApiError::BadRequest(format!("Unknown package: {}", slug)))?,
        ),
        (None, None) => None,
    };
    let destination_id = match (input.destination_id, input.destination_slug.as_deref()) {
        (Some(id), _) => Some(id),
        (None, Some(slug)) => Some(
            Destination::find_id_by_slug(slug, pool)
                .await?
                .ok_or_else(|| ApiError::BadRequest(format!("Unknown destination: {}", slug)))?,
        ),
        (None, None) => None,
    };
    Ok((package_id, destination_id))
}

pub async fn create_offer(input: CreateOffer, deps: &ServerDeps) -> ApiResult<OfferData> {
    input.validate()?;

    let (package_id, destination_id) = resolve_links(&input, &deps.db_pool).await?;
    let slug = input.resolved_slug();
    let offer = Offer::create(&slug, &input, package_id, destination_id, false, &deps.db_pool).await?;

    info!(offer_id = %offer.id, slug = %offer.slug, "Offer created");
    Ok(OfferData::from_model(offer, today(), deps.fallback_image()))
}

/// Seed path: same resolution as create, upserting on slug.
pub async fn upsert_offer(input: &CreateOffer, pool: &PgPool) -> ApiResult<Offer> {
    input.validate()?;

    let (package_id, destination_id) = resolve_links(input, pool).await?;
    let slug = input.resolved_slug();
    Ok(Offer::create(&slug, input, package_id, destination_id, true, pool).await?)
}

pub async fn update_offer(
    id: OfferId,
    input: UpdateOffer,
    deps: &ServerDeps,
) -> ApiResult<OfferData> {
    input.validate()?;

    let offer = Offer::update(id, &input, &deps.db_pool).await?;

    info!(offer_id = %id, "Offer updated");
    Ok(OfferData::from_model(offer, today(), deps.fallback_image()))
}

pub async fn delete_offer(id: OfferId, deps: &ServerDeps) -> ApiResult<()> {
    if !Offer::delete(id, &deps.db_pool).await? {
        return Err(ApiError::not_found("Offer"));
    }
    info!(offer_id = %id, "Offer deleted");
    Ok(())
}
