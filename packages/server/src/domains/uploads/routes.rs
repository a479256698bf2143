use axum::{extract::State, routing::post, Json, Router};

use crate::domains::uploads::activities;
use crate::domains::uploads::data::{UploadRequest, UploadTicket};
use crate::kernel::ServerDeps;
use crate::server::{AdminUser, ApiResult};

pub fn router() -> Router<ServerDeps> {
    Router::new().route("/uploads", post(create))
}

async fn create(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Json(request): Json<UploadRequest>,
) -> ApiResult<Json<UploadTicket>> {
    Ok(Json(activities::request_upload(request, &deps).await?))
}
