use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use crate::common::auth::AuthUser;
use crate::common::PackageId;
use crate::domains::packages::activities;
use crate::domains::packages::data::PackageData;
use crate::domains::packages::models::{CreatePackage, PackageFilter, UpdatePackage};
use crate::kernel::ServerDeps;
use crate::server::{AdminUser, ApiResult, Visibility, VisibilityQuery};

pub fn router() -> Router<ServerDeps> {
    Router::new()
        .route("/packages", get(list).post(create))
        .route("/packages/slug/:slug", get(by_slug))
        .route("/packages/:id", get(detail).patch(update).delete(remove))
}

async fn list(
    State(deps): State<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Query(filter): Query<PackageFilter>,
) -> ApiResult<Json<Vec<PackageData>>> {
    let visibility = Visibility::resolve(user.as_deref(), filter.include_unpublished);
    Ok(Json(activities::list_packages(&filter, visibility, &deps).await?))
}

async fn by_slug(
    State(deps): State<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Path(slug): Path<String>,
    Query(query): Query<VisibilityQuery>,
) -> ApiResult<Json<PackageData>> {
    let visibility = Visibility::resolve(user.as_deref(), query.include_unpublished);
    Ok(Json(activities::get_package_by_slug(&slug, visibility, &deps).await?))
}

async fn detail(
    State(deps): State<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Path(id): Path<PackageId>,
) -> ApiResult<Json<PackageData>> {
    let visibility = Visibility::for_record(user.as_deref());
    Ok(Json(activities::get_package(id, visibility, &deps).await?))
}

async fn create(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Json(input): Json<CreatePackage>,
) -> ApiResult<(StatusCode, Json<PackageData>)> {
    let package = activities::create_package(input, &deps).await?;
    Ok((StatusCode::CREATED, Json(package)))
}

async fn update(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Path(id): Path<PackageId>,
    Json(input): Json<UpdatePackage>,
) -> ApiResult<Json<PackageData>> {
    Ok(Json(activities::update_package(id, input, &deps).await?))
}

async fn remove(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Path(id): Path<PackageId>,
) -> ApiResult<StatusCode> {
    activities::delete_package(id, &deps).await?;
    Ok(StatusCode::NO_CONTENT)
}
