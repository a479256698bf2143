//! Blog activities

use anyhow::Result;
use chrono::Utc;
use tracing::info;

use crate::common::{BlogPostId, Validate};
use crate::domains::blog::data::{BlogPostData, BlogPostSummary};
use crate::domains::blog::models::{BlogPost, BlogPostFilter, CreateBlogPost, UpdateBlogPost};
use crate::kernel::ServerDeps;
use crate::server::{ApiError, ApiResult, Visibility};

pub async fn list_posts(
    filter: &BlogPostFilter,
    visibility: Visibility,
    deps: &ServerDeps,
) -> Result<Vec<BlogPostSummary>> {
    let posts = BlogPost::find_with_filters(filter, visibility, &deps.db_pool).await?;
    Ok(posts
        .iter()
        .map(|p| BlogPostSummary::from_model(p, deps.fallback_image()))
        .collect())
}

pub async fn get_post(
    id: BlogPostId,
    visibility: Visibility,
    deps: &ServerDeps,
) -> ApiResult<BlogPostData> {
    let now = Utc::now();
    let post = BlogPost::find_by_id(id, &deps.db_pool).await?;
    if !visibility.allows(post.is_live_at(now)) {
        return Err(ApiError::not_found("Blog post"));
    }
    Ok(BlogPostData::from_model(post, now, deps.fallback_image()))
}

pub async fn get_post_by_slug(
    slug: &str,
    visibility: Visibility,
    deps: &ServerDeps,
) -> ApiResult<BlogPostData> {
    let post = BlogPost::find_by_slug(slug, visibility, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Blog post"))?;
    Ok(BlogPostData::from_model(post, Utc::now(), deps.fallback_image()))
}

pub async fn create_post(input: CreateBlogPost, deps: &ServerDeps) -> ApiResult<BlogPostData> {
    input.validate()?;

    let slug = input.resolved_slug();
    let post = BlogPost::create(&slug, &input, &deps.db_pool).await?;

    info!(post_id = %post.id, slug = %post.slug, "Blog post created");
    Ok(BlogPostData::from_model(post, Utc::now(), deps.fallback_image()))
}

pub async fn update_post(
    id: BlogPostId,
    input: UpdateBlogPost,
    deps: &ServerDeps,
) -> ApiResult<BlogPostData> {
    input.validate()?;

    let post = BlogPost::update(id, &input, &deps.db_pool).await?;

    info!(post_id = %id, unpublished = input.unpublish, "Blog post updated");
    Ok(BlogPostData::from_model(post, Utc::now(), deps.fallback_image()))
}

pub async fn delete_post(id: BlogPostId, deps: &ServerDeps) -> ApiResult<()> {
    if !BlogPost::delete(id, &deps.db_pool).await? {
        return Err(ApiError::not_found("Blog post"));
    }
    info!(post_id = %id, "Blog post deleted");
    Ok(())
}
