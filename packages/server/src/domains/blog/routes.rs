use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use crate::common::auth::AuthUser;
use crate::common::BlogPostId;
use crate::domains::blog::activities;
use crate::domains::blog::data::{BlogPostData, BlogPostSummary};
use crate::domains::blog::models::{BlogPostFilter, CreateBlogPost, UpdateBlogPost};
use crate::kernel::ServerDeps;
use crate::server::{AdminUser, ApiResult, Visibility, VisibilityQuery};

pub fn router() -> Router<ServerDeps> {
    Router::new()
        .route("/blog", get(list).post(create))
        .route("/blog/slug/:slug", get(by_slug))
        .route("/blog/:id", get(detail).patch(update).delete(remove))
}

async fn list(
    State(deps): State<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Query(filter): Query<BlogPostFilter>,
) -> ApiResult<Json<Vec<BlogPostSummary>>> {
    let visibility = Visibility::resolve(user.as_deref(), filter.include_unpublished);
    Ok(Json(activities::list_posts(&filter, visibility, &deps).await?))
}

async fn by_slug(
    State(deps): State<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Path(slug): Path<String>,
    Query(query): Query<VisibilityQuery>,
) -> ApiResult<Json<BlogPostData>> {
    let visibility = Visibility::resolve(user.as_deref(), query.include_unpublished);
    Ok(Json(activities::get_post_by_slug(&slug, visibility, &deps).await?))
}

async fn detail(
    State(deps): State<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Path(id): Path<BlogPostId>,
) -> ApiResult<Json<BlogPostData>> {
    let visibility = Visibility::for_record(user.as_deref());
    Ok(Json(activities::get_post(id, visibility, &deps).await?))
}

async fn create(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Json(input): Json<CreateBlogPost>,
) -> ApiResult<(StatusCode, Json<BlogPostData>)> {
    let post = activities::create_post(input, &deps).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

async fn update(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Path(id): Path<BlogPostId>,
    Json(input): Json<UpdateBlogPost>,
) -> ApiResult<Json<BlogPostData>> {
    Ok(Json(activities::update_post(id, input, &deps).await?))
}

async fn remove(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Path(id): Path<BlogPostId>,
) -> ApiResult<StatusCode> {
    activities::delete_post(id, &deps).await?;
    Ok(StatusCode::NO_CONTENT)
}
