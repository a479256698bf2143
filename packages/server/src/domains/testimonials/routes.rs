use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use crate::common::auth::AuthUser;
use crate::common::TestimonialId;
use crate::domains::testimonials::activities;
use crate::domains::testimonials::data::TestimonialData;
use crate::domains::testimonials::models::{
    CreateTestimonial, TestimonialFilter, UpdateTestimonial,
};
use crate::kernel::ServerDeps;
use crate::server::{AdminUser, ApiResult, Visibility};

pub fn router() -> Router<ServerDeps> {
    Router::new()
        .route("/testimonials", get(list).post(create))
        .route("/testimonials/:id", get(detail).patch(update).delete(remove))
}

async fn list(
    State(deps): State<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Query(filter): Query<TestimonialFilter>,
) -> ApiResult<Json<Vec<TestimonialData>>> {
    let visibility = Visibility::resolve(user.as_deref(), filter.include_unpublished);
    Ok(Json(
        activities::list_testimonials(&filter, visibility, &deps).await?,
    ))
}

async fn detail(
    State(deps): State<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Path(id): Path<TestimonialId>,
) -> ApiResult<Json<TestimonialData>> {
    let visibility = Visibility::for_record(user.as_deref());
    Ok(Json(activities::get_testimonial(id, visibility, &deps).await?))
}

async fn create(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Json(input): Json<CreateTestimonial>,
) -> ApiResult<(StatusCode, Json<TestimonialData>)> {
    let testimonial = activities::create_testimonial(input, &deps).await?;
    Ok((StatusCode::CREATED, Json(testimonial)))
}

async fn update(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Path(id): Path<TestimonialId>,
    Json(input): Json<UpdateTestimonial>,
) -> ApiResult<Json<TestimonialData>> {
    Ok(Json(activities::update_testimonial(id, input, &deps).await?))
}

async fn remove(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Path(id): Path<TestimonialId>,
) -> ApiResult<StatusCode> {
    activities::delete_testimonial(id, &deps).await?;
    Ok(StatusCode::NO_CONTENT)
}
