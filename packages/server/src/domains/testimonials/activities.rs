//! Testimonial activities

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::common::{TestimonialId, Validate};
use crate::domains::testimonials::data::TestimonialData;
use crate::domains::testimonials::models::{
    CreateTestimonial, Testimonial, TestimonialFilter, UpdateTestimonial,
};
use crate::kernel::ServerDeps;
use crate::server::{ApiError, ApiResult, Visibility};

pub async fn list_testimonials(
    filter: &TestimonialFilter,
    visibility: Visibility,
    deps: &ServerDeps,
) -> Result<Vec<TestimonialData>> {
    let testimonials = Testimonial::find_with_filters(filter, visibility, &deps.db_pool).await?;
    Ok(testimonials
        .into_iter()
        .map(|t| TestimonialData::from_model(t, deps.fallback_image()))
        .collect())
}

pub async fn get_testimonial(
    id: TestimonialId,
    visibility: Visibility,
    deps: &ServerDeps,
) -> ApiResult<TestimonialData> {
    let testimonial = Testimonial::find_by_id(id, &deps.db_pool).await?;
    if !visibility.allows(testimonial.published) {
        return Err(ApiError::not_found("Testimonial"));
    }
    Ok(TestimonialData::from_model(testimonial, deps.fallback_image()))
}

pub async fn create_testimonial(
    input: CreateTestimonial,
    deps: &ServerDeps,
) -> ApiResult<TestimonialData> {
    input.validate()?;

    let testimonial = Testimonial::create(&input, &deps.db_pool).await?;

    info!(testimonial_id = %testimonial.id, "Testimonial created");
    Ok(TestimonialData::from_model(testimonial, deps.fallback_image()))
}

/// Seed path: testimonials have no slug, so author and body identify them.
pub async fn seed_testimonial(input: &CreateTestimonial, pool: &PgPool) -> ApiResult<Testimonial> {
    input.validate()?;
    Ok(Testimonial::create_if_missing(input, pool).await?)
}

pub async fn update_testimonial(
    id: TestimonialId,
    input: UpdateTestimonial,
    deps: &ServerDeps,
) -> ApiResult<TestimonialData> {
    input.validate()?;

    let testimonial = Testimonial::update(id, &input, &deps.db_pool).await?;

    info!(testimonial_id = %id, "Testimonial updated");
    Ok(TestimonialData::from_model(testimonial, deps.fallback_image()))
}

pub async fn delete_testimonial(id: TestimonialId, deps: &ServerDeps) -> ApiResult<()> {
    if !Testimonial::delete(id, &deps.db_pool).await? {
        return Err(ApiError::not_found("Testimonial"));
    }
    info!(testimonial_id = %id, "Testimonial deleted");
    Ok(())
}
