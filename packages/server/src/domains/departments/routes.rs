use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use crate::common::auth::AuthUser;
use crate::common::{DepartmentDestinationId, DepartmentId};
use crate::domains::departments::activities;
use crate::domains::departments::data::{
    DepartmentData, DepartmentDestinationData, DepartmentPageData,
};
use crate::domains::departments::models::{
    CreateDepartment, CreateDepartmentDestination, DepartmentDestinationFilter, UpdateDepartment,
    UpdateDepartmentDestination,
};
use crate::kernel::ServerDeps;
use crate::server::{AdminUser, ApiResult, Visibility, VisibilityQuery};

// `:department` is the id on department routes and the slug on venue routes;
// sibling routes must share one parameter name.
pub fn router() -> Router<ServerDeps> {
    Router::new()
        .route("/departments", get(list).post(create))
        .route("/departments/slug/:slug", get(page))
        .route(
            "/departments/:department",
            get(detail).patch(update).delete(remove),
        )
        .route(
            "/departments/:department/destinations",
            get(list_destinations).post(create_destination),
        )
        .route(
            "/departments/:department/destinations/slug/:slug",
            get(destination_by_slug),
        )
        .route(
            "/departments/:department/destinations/:id",
            get(destination_detail)
                .patch(update_destination)
                .delete(remove_destination),
        )
}

async fn list(
    State(deps): State<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Query(query): Query<VisibilityQuery>,
) -> ApiResult<Json<Vec<DepartmentData>>> {
    let visibility = Visibility::resolve(user.as_deref(), query.include_unpublished);
    Ok(Json(activities::list_departments(visibility, &deps).await?))
}

async fn page(
    State(deps): State<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Path(slug): Path<String>,
    Query(query): Query<VisibilityQuery>,
) -> ApiResult<Json<DepartmentPageData>> {
    let visibility = Visibility::resolve(user.as_deref(), query.include_unpublished);
    Ok(Json(activities::get_department_page(&slug, visibility, &deps).await?))
}

async fn detail(
    State(deps): State<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Path(id): Path<DepartmentId>,
) -> ApiResult<Json<DepartmentData>> {
    let visibility = Visibility::for_record(user.as_deref());
    Ok(Json(activities::get_department(id, visibility, &deps).await?))
}

async fn create(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Json(input): Json<CreateDepartment>,
) -> ApiResult<(StatusCode, Json<DepartmentData>)> {
    let department = activities::create_department(input, &deps).await?;
    Ok((StatusCode::CREATED, Json(department)))
}

async fn update(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Path(id): Path<DepartmentId>,
    Json(input): Json<UpdateDepartment>,
) -> ApiResult<Json<DepartmentData>> {
    Ok(Json(activities::update_department(id, input, &deps).await?))
}

async fn remove(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Path(id): Path<DepartmentId>,
) -> ApiResult<StatusCode> {
    activities::delete_department(id, &deps).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_destinations(
    State(deps): State<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Path(department): Path<String>,
    Query(filter): Query<DepartmentDestinationFilter>,
) -> ApiResult<Json<Vec<DepartmentDestinationData>>> {
    let kind = activities::kind_for(&department)?;
    let visibility = Visibility::resolve(user.as_deref(), filter.include_unpublished);
    Ok(Json(
        activities::list_department_destinations(kind, &filter, visibility, &deps).await?,
    ))
}

async fn destination_by_slug(
    State(deps): State<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Path((department, slug)): Path<(String, String)>,
    Query(query): Query<VisibilityQuery>,
) -> ApiResult<Json<DepartmentDestinationData>> {
    let kind = activities::kind_for(&department)?;
    let visibility = Visibility::resolve(user.as_deref(), query.include_unpublished);
    Ok(Json(
        activities::get_department_destination_by_slug(kind, &slug, visibility, &deps).await?,
    ))
}

async fn destination_detail(
    State(deps): State<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Path((department, id)): Path<(String, DepartmentDestinationId)>,
) -> ApiResult<Json<DepartmentDestinationData>> {
    let kind = activities::kind_for(&department)?;
    let visibility = Visibility::for_record(user.as_deref());
    Ok(Json(
        activities::get_department_destination(kind, id, visibility, &deps).await?,
    ))
}

async fn create_destination(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Path(department): Path<String>,
    Json(input): Json<CreateDepartmentDestination>,
) -> ApiResult<(StatusCode, Json<DepartmentDestinationData>)> {
    let kind = activities::kind_for(&department)?;
    let row = activities::create_department_destination(kind, input, &deps).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

async fn update_destination(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Path((department, id)): Path<(String, DepartmentDestinationId)>,
    Json(input): Json<UpdateDepartmentDestination>,
) -> ApiResult<Json<DepartmentDestinationData>> {
    let kind = activities::kind_for(&department)?;
    Ok(Json(
        activities::update_department_destination(kind, id, input, &deps).await?,
    ))
}

async fn remove_destination(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Path((department, id)): Path<(String, DepartmentDestinationId)>,
) -> ApiResult<StatusCode> {
    let kind = activities::kind_for(&department)?;
    activities::delete_department_destination(kind, id, &deps).await?;
    Ok(StatusCode::NO_CONTENT)
}
