use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use crate::common::auth::AuthUser;
use crate::common::FixedDepartureId;
use crate::domains::fixed_departures::activities;
use crate::domains::fixed_departures::data::FixedDepartureData;
use crate::domains::fixed_departures::models::{
    CreateFixedDeparture, FixedDepartureFilter, UpdateFixedDeparture,
};
use crate::kernel::ServerDeps;
use crate::server::{AdminUser, ApiResult, Visibility};

pub fn router() -> Router<ServerDeps> {
    Router::new()
        .route("/fixed-departures", get(list).post(create))
        .route(
            "/fixed-departures/:id",
            get(detail).patch(update).delete(remove),
        )
}

async fn list(
    State(deps): State<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Query(filter): Query<FixedDepartureFilter>,
) -> ApiResult<Json<Vec<FixedDepartureData>>> {
    let visibility = Visibility::resolve(user.as_deref(), filter.include_unpublished);
    Ok(Json(
        activities::list_departures(&filter, visibility, &deps).await?,
    ))
}

async fn detail(
    State(deps): State<ServerDeps>,
    Path(id): Path<FixedDepartureId>,
) -> ApiResult<Json<FixedDepartureData>> {
    Ok(Json(activities::get_departure(id, &deps).await?))
}

async fn create(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Json(input): Json<CreateFixedDeparture>,
) -> ApiResult<(StatusCode, Json<FixedDepartureData>)> {
    let departure = activities::create_departure(input, &deps).await?;
    Ok((StatusCode::CREATED, Json(departure)))
}

async fn update(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Path(id): Path<FixedDepartureId>,
    Json(input): Json<UpdateFixedDeparture>,
) -> ApiResult<Json<FixedDepartureData>> {
    Ok(Json(activities::update_departure(id, input, &deps).await?))
}

async fn remove(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Path(id): Path<FixedDepartureId>,
) -> ApiResult<StatusCode> {
    activities::delete_departure(id, &deps).await?;
    Ok(StatusCode::NO_CONTENT)
}
