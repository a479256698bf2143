use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::common::auth::AuthUser;
use crate::common::TemplateId;
use crate::domains::whatsapp::activities;
use crate::domains::whatsapp::data::{TemplateData, WhatsAppLinkData, WhatsAppLinkRequest};
use crate::domains::whatsapp::models::{CreateTemplate, TemplateFilter, UpdateTemplate};
use crate::kernel::ServerDeps;
use crate::server::{AdminUser, ApiResult};

pub fn router() -> Router<ServerDeps> {
    Router::new()
        .route("/whatsapp/link", post(link))
        .route("/whatsapp/templates", get(list).post(create))
        .route("/whatsapp/templates/slug/:slug", get(by_slug))
        .route(
            "/whatsapp/templates/:id",
            get(detail).patch(update).delete(remove),
        )
}

async fn link(
    State(deps): State<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Json(request): Json<WhatsAppLinkRequest>,
) -> ApiResult<Json<WhatsAppLinkData>> {
    Ok(Json(
        activities::build_link(request, user.as_deref(), &deps).await?,
    ))
}

async fn list(
    State(deps): State<ServerDeps>,
    Query(filter): Query<TemplateFilter>,
) -> ApiResult<Json<Vec<TemplateData>>> {
    Ok(Json(activities::list_templates(&filter, &deps).await?))
}

async fn by_slug(
    State(deps): State<ServerDeps>,
    Path(slug): Path<String>,
) -> ApiResult<Json<TemplateData>> {
    Ok(Json(activities::get_template_by_slug(&slug, &deps).await?))
}

async fn detail(
    State(deps): State<ServerDeps>,
    Path(id): Path<TemplateId>,
) -> ApiResult<Json<TemplateData>> {
    Ok(Json(activities::get_template(id, &deps).await?))
}

async fn create(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Json(input): Json<CreateTemplate>,
) -> ApiResult<(StatusCode, Json<TemplateData>)> {
    let template = activities::create_template(input, &deps).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

async fn update(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Path(id): Path<TemplateId>,
    Json(input): Json<UpdateTemplate>,
) -> ApiResult<Json<TemplateData>> {
    Ok(Json(activities::update_template(id, input, &deps).await?))
}

async fn remove(
    State(deps): State<ServerDeps>,
    _admin: AdminUser,
    Path(id): Path<TemplateId>,
) -> ApiResult<StatusCode> {
    activities::delete_template(id, &deps).await?;
    Ok(StatusCode::NO_CONTENT)
}
