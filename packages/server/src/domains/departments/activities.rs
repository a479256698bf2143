//! Department and department-destination activities

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::common::{DepartmentDestinationId, DepartmentId, Validate};
use crate::domains::departments::data::{
    DepartmentData, DepartmentDestinationData, DepartmentPageData,
};
use crate::domains::departments::models::{
    CreateDepartment, CreateDepartmentDestination, Department, DepartmentDestination,
    DepartmentDestinationFilter, DepartmentKind, UpdateDepartment, UpdateDepartmentDestination,
};
use crate::kernel::ServerDeps;
use crate::server::{ApiError, ApiResult, Visibility};

// =============================================================================
// Departments
// =============================================================================

pub async fn list_departments(
    visibility: Visibility,
    deps: &ServerDeps,
) -> Result<Vec<DepartmentData>> {
    let departments = Department::find_all(visibility, &deps.db_pool).await?;
    Ok(departments
        .into_iter()
        .map(|d| DepartmentData::from_model(d, deps.fallback_image()))
        .collect())
}

pub async fn get_department(
    id: DepartmentId,
    visibility: Visibility,
    deps: &ServerDeps,
) -> ApiResult<DepartmentData> {
    let department = Department::find_by_id(id, &deps.db_pool).await?;
    if !visibility.allows(department.published) {
        return Err(ApiError::not_found("Department"));
    }
    Ok(DepartmentData::from_model(department, deps.fallback_image()))
}

/// Department landing page with its published venues
pub async fn get_department_page(
    slug: &str,
    visibility: Visibility,
    deps: &ServerDeps,
) -> ApiResult<DepartmentPageData> {
    let department = Department::find_by_slug(slug, visibility, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Department"))?;

    let destinations = match DepartmentKind::from_department_slug(&department.slug) {
        Some(kind) => {
            let filter = DepartmentDestinationFilter::default();
            DepartmentDestination::find_with_filters(kind, &filter, visibility, &deps.db_pool)
                .await?
                .into_iter()
                .map(|row| DepartmentDestinationData::from_model(row, deps.fallback_image()))
                .collect()
        }
        None => Vec::new(),
    };

    Ok(DepartmentPageData {
        department: DepartmentData::from_model(department, deps.fallback_image()),
        destinations,
    })
}

pub async fn create_department(
    input: CreateDepartment,
    deps: &ServerDeps,
) -> ApiResult<DepartmentData> {
    input.validate()?;

    let slug = input.resolved_slug();
    let department = Department::create(&slug, &input, false, &deps.db_pool).await?;

    info!(department_id = %department.id, slug = %department.slug, "Department created");
    Ok(DepartmentData::from_model(department, deps.fallback_image()))
}

pub async fn upsert_department(input: &CreateDepartment, pool: &PgPool) -> ApiResult<Department> {
    input.validate()?;
    Ok(Department::create(&input.resolved_slug(), input, true, pool).await?)
}

pub async fn update_department(
    id: DepartmentId,
    input: UpdateDepartment,
    deps: &ServerDeps,
) -> ApiResult<DepartmentData> {
    input.validate()?;

    let department = Department::update(id, &input, &deps.db_pool).await?;

    info!(department_id = %id, "Department updated");
    Ok(DepartmentData::from_model(department, deps.fallback_image()))
}

pub async fn delete_department(id: DepartmentId, deps: &ServerDeps) -> ApiResult<()> {
    if !Department::delete(id, &deps.db_pool).await? {
        return Err(ApiError::not_found("Department"));
    }
    info!(department_id = %id, "Department deleted");
    Ok(())
}

// =============================================================================
// Department destinations (wedding / quinceañera venues)
// =============================================================================

/// Unknown department slugs have no venue table
pub fn kind_for(department_slug: &str) -> ApiResult<DepartmentKind> {
    DepartmentKind::from_department_slug(department_slug)
        .ok_or_else(|| ApiError::not_found("Department"))
}

pub async fn list_department_destinations(
    kind: DepartmentKind,
    filter: &DepartmentDestinationFilter,
    visibility: Visibility,
    deps: &ServerDeps,
) -> Result<Vec<DepartmentDestinationData>> {
    let rows =
        DepartmentDestination::find_with_filters(kind, filter, visibility, &deps.db_pool).await?;
    Ok(rows
        .into_iter()
        .map(|row| DepartmentDestinationData::from_model(row, deps.fallback_image()))
        .collect())
}

pub async fn get_department_destination(
    kind: DepartmentKind,
    id: DepartmentDestinationId,
    visibility: Visibility,
    deps: &ServerDeps,
) -> ApiResult<DepartmentDestinationData> {
    let row = DepartmentDestination::find_by_id(kind, id, &deps.db_pool).await?;
    if !visibility.allows(row.published) {
        return Err(ApiError::not_found("Destination"));
    }
    Ok(DepartmentDestinationData::from_model(row, deps.fallback_image()))
}

pub async fn get_department_destination_by_slug(
    kind: DepartmentKind,
    slug: &str,
    visibility: Visibility,
    deps: &ServerDeps,
) -> ApiResult<DepartmentDestinationData> {
    let row = DepartmentDestination::find_by_slug(kind, slug, visibility, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Destination"))?;
    Ok(DepartmentDestinationData::from_model(row, deps.fallback_image()))
}

pub async fn create_department_destination(
    kind: DepartmentKind,
    input: CreateDepartmentDestination,
    deps: &ServerDeps,
) -> ApiResult<DepartmentDestinationData> {
    input.validate()?;

    let slug = input.resolved_slug();
    let row = DepartmentDestination::create(kind, &slug, &input, false, &deps.db_pool).await?;

    info!(kind = %kind, destination_id = %row.id, slug = %row.slug, "Department destination created");
    Ok(DepartmentDestinationData::from_model(row, deps.fallback_image()))
}

pub async fn upsert_department_destination(
    kind: DepartmentKind,
    input: &CreateDepartmentDestination,
    pool: &PgPool,
) -> ApiResult<DepartmentDestination> {
    input.validate()?;
    Ok(DepartmentDestination::create(kind, &input.resolved_slug(), input, true, pool).await?)
}

pub async fn update_department_destination(
    kind: DepartmentKind,
    id: DepartmentDestinationId,
    input: UpdateDepartmentDestination,
    deps: &ServerDeps,
) -> ApiResult<DepartmentDestinationData> {
    input.validate()?;

    let row = DepartmentDestination::update(kind, id, &input, &deps.db_pool).await?;

    info!(kind = %kind, destination_id = %id, "Department destination updated");
    Ok(DepartmentDestinationData::from_model(row, deps.fallback_image()))
}

pub async fn delete_department_destination(
    kind: DepartmentKind,
    id: DepartmentDestinationId,
    deps: &ServerDeps,
) -> ApiResult<()> {
    if !DepartmentDestination::delete(kind, id, &deps.db_pool).await? {
        return Err(ApiError::not_found("Destination"));
    }
    info!(kind = %kind, destination_id = %id, "Department destination deleted");
    Ok(())
}
