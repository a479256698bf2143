//! Package activities

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::common::{DestinationId, PackageId, Validate};
use crate::domains::destinations::models::Destination;
use crate::domains::packages::data::PackageData;
use crate::domains::packages::models::{
    CreatePackage, Package, PackageFilter, PackageWithDestination, UpdatePackage,
};
use crate::domains::tag::models::{group_by_owner, Tag};
use crate::kernel::ServerDeps;
use crate::server::{ApiError, ApiResult, Visibility};

pub async fn list_packages(
    filter: &PackageFilter,
    visibility: Visibility,
    deps: &ServerDeps,
) -> Result<Vec<PackageData>> {
    let packages = Package::find_with_filters(filter, visibility, &deps.db_pool).await?;
    with_tags(packages, deps).await
}

pub async fn with_tags(
    rows: Vec<PackageWithDestination>,
    deps: &ServerDeps,
) -> Result<Vec<PackageData>> {
    let ids: Vec<PackageId> = rows.iter().map(|r| r.package.id).collect();
    let mut tags = group_by_owner(Tag::find_for_package_ids(&ids, &deps.db_pool).await?);

    Ok(rows
        .into_iter()
        .map(|row| {
            let tags = tags.remove(row.package.id.as_uuid()).unwrap_or_default();
            PackageData::from_model(row, tags, deps.fallback_image())
        })
        .collect())
}

async fn load(id: PackageId, deps: &ServerDeps) -> Result<PackageData> {
    let row = Package::find_by_id(id, &deps.db_pool).await?;
    let tags = Tag::find_for_package(id, &deps.db_pool).await?;
    Ok(PackageData::from_model(row, tags, deps.fallback_image()))
}

pub async fn get_package(
    id: PackageId,
    visibility: Visibility,
    deps: &ServerDeps,
) -> ApiResult<PackageData> {
    let package = load(id, deps).await?;
    if !visibility.allows(package.published) {
        return Err(ApiError::not_found("Package"));
    }
    Ok(package)
}

pub async fn get_package_by_slug(
    slug: &str,
    visibility: Visibility,
    deps: &ServerDeps,
) -> ApiResult<PackageData> {
    let row = Package::find_by_slug(slug, visibility, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Package"))?;
    let tags = Tag::find_for_package(row.package.id, &deps.db_pool).await?;
    Ok(PackageData::from_model(row, tags, deps.fallback_image()))
}

/// Explicit id wins; otherwise look the destination up by slug.
pub async fn resolve_destination(
    input: &CreatePackage,
    pool: &PgPool,
) -> ApiResult<Option<DestinationId>> {
    if input.destination_id.is_some() {
        return Ok(input.destination_id);
    }
    match input.destination_slug.as_deref() {
        None => Ok(None),
        Some(slug) => Destination::find_id_by_slug(slug, pool)
            .await?
            .map(Some)
            .ok_or_else(|| ApiError::BadRequest(format!("Unknown destination: {}", slug))),
    }
}

pub async fn create_package(input: CreatePackage, deps: &ServerDeps) -> ApiResult<PackageData> {
    input.validate()?;

    let destination_id = resolve_destination(&input, &deps.db_pool).await?;
    let slug = input.resolved_slug();
    let package = Package::create(&slug, &input, destination_id, false, &deps.db_pool).await?;
    if !input.tag_ids.is_empty() {
        Tag::replace_for_package(package.id, &input.tag_ids, &deps.db_pool).await?;
    }

    info!(package_id = %package.id, slug = %package.slug, "Package created");
    Ok(load(package.id, deps).await?)
}

/// Seed path: same resolution as create, upserting on slug.
pub async fn upsert_package(input: &CreatePackage, pool: &PgPool) -> ApiResult<Package> {
    input.validate()?;

    let destination_id = resolve_destination(input, pool).await?;
    let slug = input.resolved_slug();
    let package = Package::create(&slug, input, destination_id, true, pool).await?;
    Tag::replace_for_package(package.id, &input.tag_ids, pool).await?;
    Ok(package)
}

pub async fn update_package(
    id: PackageId,
    input: UpdatePackage,
    deps: &ServerDeps,
) -> ApiResult<PackageData> {
    input.validate()?;

    Package::update(id, &input, &deps.db_pool).await?;
    if let Some(tag_ids) = &input.tag_ids {
        Tag::replace_for_package(id, tag_ids, &deps.db_pool).await?;
    }

    info!(package_id = %id, "Package updated");
    Ok(load(id, deps).await?)
}

pub async fn delete_package(id: PackageId, deps: &ServerDeps) -> ApiResult<()> {
    if !Package::delete(id, &deps.db_pool).await? {
        return Err(ApiError::not_found("Package"));
    }
    info!(package_id = %id, "Package deleted");
    Ok(())
}
