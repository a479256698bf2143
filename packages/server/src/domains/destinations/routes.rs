use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use crate::common::auth::AuthUser;
use crate::common::DestinationId;
use crate::domains::destinations::activities;
use crate::domains::destinations::data::DestinationData;
use crate::domains::destinations::models::{CreateDestination, DestinationFilter, UpdateDestination};
use crate::kernel::ServerDeps;
use crate::server::{AdminUser, ApiResult, Visibility, VisibilityQuery};

pub fn router() -> Router<ServerDeps> {
    Router::new()
        .route("/destinations", get(list).post(create))
        .route("/destinations/slug/:slug", get(by_slug))
        .route("/destinations/:id", get(detail).patch(update).delete(remove))
}

async fn list(
    State(deps): State<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Query(filter): Query<DestinationFilter>,
) -> ApiResult<Json<Vec<DestinationData>>> {
    let visibility = Visibility::resolve(user.as_deref(), filter.include_unpublished);
    Ok(Json(
        activities::list_destinations(&filter, visibility, &deps).await?,
    ))
}

async fn by_slug(
    State(deps): State<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Path(slug): Path<String>,
    Query(query): Query<VisibilityQuery>,
) -> ApiResult<Json<DestinationData>> {
    let visibility = Visibility::resolve(user.as_deref(), query.include_unpublished);
    Ok(Json(
        activities::get_destination_by_slug(&slug, visibility, &deps).await?,
    ))
}

async fn detail(
    State(deps): State<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Path(id): Path<DestinationId>,
) -> ApiResult<Json<DestinationData>> {
    let visibility = Visibility::for_record(user.as_deref());
    Ok(Json(activities::get_destination(id, visibility, &deps).await?))
}

async fn create(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Json(input): Json<CreateDestination>,
) -> ApiResult<(StatusCode, Json<DestinationData>)> {
    let destination = activities::create_destination(input, &deps).await?;
    Ok((StatusCode::CREATED, Json(destination)))
}

async fn update(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Path(id): Path<DestinationId>,
    Json(input): Json<UpdateDestination>,
) -> ApiResult<Json<DestinationData>> {
    Ok(Json(activities::update_destination(id, input, &deps).await?))
}

async fn remove(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Path(id): Path<DestinationId>,
) -> ApiResult<StatusCode> {
    activities::delete_destination(id, &deps).await?;
    Ok(StatusCode::NO_CONTENT)
}
