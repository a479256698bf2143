//! Fixed departure activities

use anyhow::Result;
use chrono::Utc;
use tracing::info;

use crate::common::{FixedDepartureId, Validate};
use crate::domains::fixed_departures::data::FixedDepartureData;
use crate::domains::fixed_departures::models::{
    CreateFixedDeparture, FixedDeparture, FixedDepartureFilter, UpdateFixedDeparture,
};
use crate::kernel::ServerDeps;
use crate::server::{ApiError, ApiResult, Visibility};

pub async fn list_departures(
    filter: &FixedDepartureFilter,
    visibility: Visibility,
    deps: &ServerDeps,
) -> Result<Vec<FixedDepartureData>> {
    let today = Utc::now().date_naive();
    let rows = FixedDeparture::find_with_filters(
        filter,
        today,
        visibility.include_unpublished(),
        &deps.db_pool,
    )
    .await?;
    Ok(rows.into_iter().map(FixedDepartureData::from).collect())
}

pub async fn get_departure(id: FixedDepartureId, deps: &ServerDeps) -> Result<FixedDepartureData> {
    Ok(FixedDeparture::find_by_id(id, &deps.db_pool).await?.into())
}

pub async fn create_departure(
    input: CreateFixedDeparture,
    deps: &ServerDeps,
) -> ApiResult<FixedDepartureData> {
    input.validate()?;
    let (Some(package_id), Some(departure_date), Some(seats_total)) =
        (input.package_id, input.departure_date, input.seats_total)
    else {
        return Err(ApiError::BadRequest(
            "package_id, departure_date and seats_total are required".to_string(),
        ));
    };

    let departure =
        FixedDeparture::create(package_id, departure_date, seats_total, &input, &deps.db_pool)
            .await?;

    info!(
        departure_id = %departure.id,
        package_id = %package_id,
        departure_date = %departure_date,
        "Fixed departure created"
    );
    Ok(get_departure(departure.id, deps).await?)
}

pub async fn update_departure(
    id: FixedDepartureId,
    input: UpdateFixedDeparture,
    deps: &ServerDeps,
) -> ApiResult<FixedDepartureData> {
    input.validate()?;

    FixedDeparture::update(id, &input, &deps.db_pool).await?;

    info!(departure_id = %id, "Fixed departure updated");
    Ok(get_departure(id, deps).await?)
}

pub async fn delete_departure(id: FixedDepartureId, deps: &ServerDeps) -> ApiResult<()> {
    if !FixedDeparture::delete(id, &deps.db_pool).await? {
        return Err(ApiError::not_found("Fixed departure"));
    }
    info!(departure_id = %id, "Fixed departure deleted");
    Ok(())
}
