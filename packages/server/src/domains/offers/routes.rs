use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use crate::common::auth::AuthUser;
use crate::common::OfferId;
use crate::domains::offers::activities;
use crate::domains::offers::data::OfferData;
use crate::domains::offers::models::{CreateOffer, OfferFilter, UpdateOffer};
use crate::kernel::ServerDeps;
use crate::server::{AdminUser, ApiResult, Visibility, VisibilityQuery};

pub fn router() -> Router<ServerDeps> {
    Router::new()
        .route("/offers", get(list).post(create))
        .route("/offers/slug/:slug", get(by_slug))
        .route("/offers/:id", get(detail).patch(update).delete(remove))
}

async fn list(
    State(deps): State<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Query(filter): Query<OfferFilter>,
) -> ApiResult<Json<Vec<OfferData>>> {
    let visibility = Visibility::resolve(user.as_deref(), filter.include_unpublished);
    Ok(Json(activities::list_offers(&filter, visibility, &deps).await?))
}

async fn by_slug(
    State(deps): State<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Path(slug): Path<String>,
    Query(query): Query<VisibilityQuery>,
) -> ApiResult<Json<OfferData>> {
    let visibility = Visibility::resolve(user.as_deref(), query.include_unpublished);
    Ok(Json(activities::get_offer_by_slug(&slug, visibility, &deps).await?))
}

async fn detail(
    State(deps): State<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Path(id): Path<OfferId>,
) -> ApiResult<Json<OfferData>> {
    let visibility = Visibility::for_record(user.as_deref());
    Ok(Json(activities::get_offer(id, visibility, &deps).await?))
}

async fn create(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Json(input): Json<CreateOffer>,
) -> ApiResult<(StatusCode, Json<OfferData>)> {
    let offer = activities::create_offer(input, &deps).await?;
    Ok((StatusCode::CREATED, Json(offer)))
}

async fn update(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Path(id): Path<OfferId>,
    Json(input): Json<UpdateOffer>,
) -> ApiResult<Json<OfferData>> {
    Ok(Json(activities::update_offer(id, input, &deps).await?))
}

async fn remove(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Path(id): Path<OfferId>,
) -> ApiResult<StatusCode> {
    activities::delete_offer(id, &deps).await?;
    Ok(StatusCode::NO_CONTENT)
}
