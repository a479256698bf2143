use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::common::TagId;
use crate::domains::tag::activities;
use crate::domains::tag::data::{CreateTagInput, TagData, UpdateTagInput};
use crate::kernel::ServerDeps;
use crate::server::{AdminUser, ApiResult};

pub fn router() -> Router<ServerDeps> {
    Router::new()
        .route("/tags", get(list).post(create))
        .route("/tags/slug/:slug", get(by_slug))
        .route("/tags/:id", get(detail).patch(update).delete(remove))
}

async fn list(State(deps): State<ServerDeps>) -> ApiResult<Json<Vec<TagData>>> {
    Ok(Json(activities::list_tags(&deps).await?))
}

async fn detail(State(deps): State<ServerDeps>, Path(id): Path<TagId>) -> ApiResult<Json<TagData>> {
    Ok(Json(activities::get_tag(id, &deps).await?))
}

async fn by_slug(
    State(deps): State<ServerDeps>,
    Path(slug): Path<String>,
) -> ApiResult<Json<TagData>> {
    Ok(Json(activities::get_tag_by_slug(&slug, &deps).await?))
}

async fn create(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Json(input): Json<CreateTagInput>,
) -> ApiResult<(StatusCode, Json<TagData>)> {
    let tag = activities::create_tag(input, &deps).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

async fn update(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Path(id): Path<TagId>,
    Json(input): Json<UpdateTagInput>,
) -> ApiResult<Json<TagData>> {
    Ok(Json(activities::update_tag(id, input, &deps).await?))
}

async fn remove(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Path(id): Path<TagId>,
) -> ApiResult<StatusCode> {
    activities::delete_tag(id, &deps).await?;
    Ok(StatusCode::NO_CONTENT)
}
