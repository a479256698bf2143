//! Destination activities

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::common::{DestinationId, Validate};
use crate::domains::destinations::data::DestinationData;
use crate::domains::destinations::models::{
    CreateDestination, Destination, DestinationFilter, UpdateDestination,
};
use crate::domains::tag::models::{group_by_owner, Tag};
use crate::kernel::ServerDeps;
use crate::server::{ApiError, ApiResult, Visibility};

pub async fn list_destinations(
    filter: &DestinationFilter,
    visibility: Visibility,
    deps: &ServerDeps,
) -> Result<Vec<DestinationData>> {
    let destinations = Destination::find_with_filters(filter, visibility, &deps.db_pool).await?;
    with_tags(destinations, deps).await
}

/// Attach tags to a page of destinations with a single batch query
pub async fn with_tags(
    destinations: Vec<Destination>,
    deps: &ServerDeps,
) -> Result<Vec<DestinationData>> {
    let ids: Vec<DestinationId> = destinations.iter().map(|d| d.id).collect();
    let mut tags = group_by_owner(Tag::find_for_destination_ids(&ids, &deps.db_pool).await?);

    Ok(destinations
        .into_iter()
        .map(|d| {
            let tags = tags.remove(d.id.as_uuid()).unwrap_or_default();
            DestinationData::from_model(d, tags, deps.fallback_image())
        })
        .collect())
}

pub async fn get_destination(
    id: DestinationId,
    visibility: Visibility,
    deps: &ServerDeps,
) -> ApiResult<DestinationData> {
    let destination = Destination::find_by_id(id, &deps.db_pool).await?;
    if !visibility.allows(destination.published) {
        return Err(ApiError::not_found("Destination"));
    }
    Ok(load(destination, deps).await?)
}

async fn load(destination: Destination, deps: &ServerDeps) -> Result<DestinationData> {
    let tags = Tag::find_for_destination(destination.id, &deps.db_pool).await?;
    Ok(DestinationData::from_model(destination, tags, deps.fallback_image()))
}

pub async fn get_destination_by_slug(
    slug: &str,
    visibility: Visibility,
    deps: &ServerDeps,
) -> ApiResult<DestinationData> {
    let destination = Destination::find_by_slug(slug, visibility, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Destination"))?;
    Ok(load(destination, deps).await?)
}

pub async fn create_destination(
    input: CreateDestination,
    deps: &ServerDeps,
) -> ApiResult<DestinationData> {
    input.validate()?;

    let slug = input.resolved_slug();
    let destination = Destination::create(&slug, &input, &deps.db_pool).await?;
    if !input.tag_ids.is_empty() {
        Tag::replace_for_destination(destination.id, &input.tag_ids, &deps.db_pool).await?;
    }

    info!(destination_id = %destination.id, slug = %destination.slug, "Destination created");
    Ok(load(destination, deps).await?)
}

/// Seed path: validate, then insert or overwrite by slug.
pub async fn upsert_destination(input: &CreateDestination, pool: &PgPool) -> ApiResult<Destination> {
    input.validate()?;

    let slug = input.resolved_slug();
    let destination = Destination::upsert(&slug, input, pool).await?;
    Tag::replace_for_destination(destination.id, &input.tag_ids, pool).await?;
    Ok(destination)
}

pub async fn update_destination(
    id: DestinationId,
    input: UpdateDestination,
    deps: &ServerDeps,
) -> ApiResult<DestinationData> {
    input.validate()?;

    let destination = Destination::update(id, &input, &deps.db_pool).await?;
    if let Some(tag_ids) = &input.tag_ids {
        Tag::replace_for_destination(id, tag_ids, &deps.db_pool).await?;
    }

    info!(destination_id = %id, "Destination updated");
    Ok(load(destination, deps).await?)
}

pub async fn delete_destination(id: DestinationId, deps: &ServerDeps) -> ApiResult<()> {
    if !Destination::delete(id, &deps.db_pool).await? {
        return Err(ApiError::not_found("Destination"));
    }
    info!(destination_id = %id, "Destination deleted");
    Ok(())
}
