//! Event activities

use anyhow::Result;
use chrono::Utc;
use tracing::info;

use crate::common::{EventId, Validate, ValidationErrors};
use crate::domains::events::data::EventData;
use crate::domains::events::models::{CreateEvent, Event, EventFilter, UpdateEvent};
use crate::kernel::ServerDeps;
use crate::server::{ApiError, ApiResult, Visibility};

pub async fn list_events(
    filter: &EventFilter,
    visibility: Visibility,
    deps: &ServerDeps,
) -> Result<Vec<EventData>> {
    let now = Utc::now();
    let events = Event::find_with_filters(filter, now, visibility, &deps.db_pool).await?;
    Ok(events
        .into_iter()
        .map(|e| EventData::from_model(e, now, deps.fallback_image()))
        .collect())
}

pub async fn get_event(
    id: EventId,
    visibility: Visibility,
    deps: &ServerDeps,
) -> ApiResult<EventData> {
    let event = Event::find_by_id(id, &deps.db_pool).await?;
    if !visibility.allows(event.published) {
        return Err(ApiError::not_found("Event"));
    }
    Ok(EventData::from_model(event, Utc::now(), deps.fallback_image()))
}

pub async fn get_event_by_slug(
    slug: &str,
    visibility: Visibility,
    deps: &ServerDeps,
) -> ApiResult<EventData> {
    let event = Event::find_by_slug(slug, visibility, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Event"))?;
    Ok(EventData::from_model(event, Utc::now(), deps.fallback_image()))
}

pub async fn create_event(input: CreateEvent, deps: &ServerDeps) -> ApiResult<EventData> {
    input.validate()?;
    let Some(starts_at) = input.starts_at else {
        let mut errors = ValidationErrors::new();
        errors.add("starts_at", "is required");
        return Err(errors.into());
    };

    let slug = input.resolved_slug();
    let event = Event::create(&slug, &input, starts_at, &deps.db_pool).await?;

    info!(event_id = %event.id, slug = %event.slug, "Event created");
    Ok(EventData::from_model(event, Utc::now(), deps.fallback_image()))
}

pub async fn update_event(
    id: EventId,
    input: UpdateEvent,
    deps: &ServerDeps,
) -> ApiResult<EventData> {
    input.validate()?;

    let event = Event::update(id, &input, &deps.db_pool).await?;

    info!(event_id = %id, "Event updated");
    Ok(EventData::from_model(event, Utc::now(), deps.fallback_image()))
}

pub async fn delete_event(id: EventId, deps: &ServerDeps) -> ApiResult<()> {
    if !Event::delete(id, &deps.db_pool).await? {
        return Err(ApiError::not_found("Event"));
    }
    info!(event_id = %id, "Event deleted");
    Ok(())
}
