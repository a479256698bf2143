//! Tag activities - validation, then model calls

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::common::{TagId, Validate};
use crate::domains::tag::data::{CreateTagInput, TagData, UpdateTagInput};
use crate::domains::tag::models::Tag;
use crate::kernel::ServerDeps;
use crate::server::{ApiError, ApiResult};

pub async fn list_tags(deps: &ServerDeps) -> Result<Vec<TagData>> {
    let tags = Tag::find_all(&deps.db_pool).await?;
    Ok(tags.into_iter().map(TagData::from).collect())
}

pub async fn get_tag(id: TagId, deps: &ServerDeps) -> Result<TagData> {
    Ok(Tag::find_by_id(id, &deps.db_pool).await?.into())
}

pub async fn get_tag_by_slug(slug: &str, deps: &ServerDeps) -> ApiResult<TagData> {
    Tag::find_by_slug(slug, &deps.db_pool)
        .await?
        .map(TagData::from)
        .ok_or_else(|| ApiError::not_found("Tag"))
}

pub async fn create_tag(input: CreateTagInput, deps: &ServerDeps) -> ApiResult<TagData> {
    input.validate()?;

    let slug = input.resolved_slug();
    let tag = Tag::create(&slug, input.name.trim(), &deps.db_pool).await?;

    info!(tag_id = %tag.id, slug = %tag.slug, "Tag created");
    Ok(tag.into())
}

/// Seed path: insert or rename by slug.
pub async fn upsert_tag(input: &CreateTagInput, pool: &PgPool) -> ApiResult<Tag> {
    input.validate()?;
    Ok(Tag::upsert(&input.resolved_slug(), input.name.trim(), pool).await?)
}

pub async fn update_tag(id: TagId, input: UpdateTagInput, deps: &ServerDeps) -> ApiResult<TagData> {
    input.validate()?;

    let name = input.name.as_deref().map(str::trim);
    let tag = Tag::update(id, input.slug.as_deref(), name, &deps.db_pool).await?;

    info!(tag_id = %tag.id, "Tag updated");
    Ok(tag.into())
}

pub async fn delete_tag(id: TagId, deps: &ServerDeps) -> ApiResult<()> {
    if !Tag::delete(id, &deps.db_pool).await? {
        return Err(ApiError::not_found("Tag"));
    }
    info!(tag_id = %id, "Tag deleted");
    Ok(())
}
