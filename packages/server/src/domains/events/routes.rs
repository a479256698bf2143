use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use crate::common::auth::AuthUser;
use crate::common::EventId;
use crate::domains::events::activities;
use crate::domains::events::data::EventData;
use crate::domains::events::models::{CreateEvent, EventFilter, UpdateEvent};
use crate::kernel::ServerDeps;
use crate::server::{AdminUser, ApiResult, Visibility, VisibilityQuery};

pub fn router() -> Router<ServerDeps> {
    Router::new()
        .route("/events", get(list).post(create))
        .route("/events/slug/:slug", get(by_slug))
        .route("/events/:id", get(detail).patch(update).delete(remove))
}

async fn list(
    State(deps): State<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Query(filter): Query<EventFilter>,
) -> ApiResult<Json<Vec<EventData>>> {
    let visibility = Visibility::resolve(user.as_deref(), filter.include_unpublished);
    Ok(Json(activities::list_events(&filter, visibility, &deps).await?))
}

async fn by_slug(
    State(deps): State<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Path(slug): Path<String>,
    Query(query): Query<VisibilityQuery>,
) -> ApiResult<Json<EventData>> {
    let visibility = Visibility::resolve(user.as_deref(), query.include_unpublished);
    Ok(Json(activities::get_event_by_slug(&slug, visibility, &deps).await?))
}

async fn detail(
    State(deps): State<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Path(id): Path<EventId>,
) -> ApiResult<Json<EventData>> {
    let visibility = Visibility::for_record(user.as_deref());
    Ok(Json(activities::get_event(id, visibility, &deps).await?))
}

async fn create(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Json(input): Json<CreateEvent>,
) -> ApiResult<(StatusCode, Json<EventData>)> {
    let event = activities::create_event(input, &deps).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

async fn update(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Path(id): Path<EventId>,
    Json(input): Json<UpdateEvent>,
) -> ApiResult<Json<EventData>> {
    Ok(Json(activities::update_event(id, input, &deps).await?))
}

async fn remove(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Path(id): Path<EventId>,
) -> ApiResult<StatusCode> {
    activities::delete_event(id, &deps).await?;
    Ok(StatusCode::NO_CONTENT)
}
