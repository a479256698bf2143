//! WhatsApp activities: template CRUD and contact-link building

use anyhow::Result;
use sqlx::PgPool;
use tracing::{debug, info, warn};

use crate::common::auth::{require_admin, AuthUser};
use crate::common::{TemplateId, Validate};
use crate::domains::whatsapp::data::{
    TemplateData, TemplateSource, WhatsAppLinkData, WhatsAppLinkRequest,
};
use crate::domains::whatsapp::link::{build_wa_link, tracking_url};
use crate::domains::whatsapp::models::{
    CreateTemplate, TemplateCategory, TemplateFilter, UpdateTemplate, WhatsAppTemplate,
};
use crate::domains::whatsapp::template::{substitute, template_vars};
use crate::kernel::ServerDeps;
use crate::server::{ApiError, ApiResult};

/// Used when no stored template applies
pub const BUILT_IN_TEMPLATE: &str = "Hola, me interesa {itemTitle}. {url}";

// =============================================================================
// Templates
// =============================================================================

pub async fn list_templates(filter: &TemplateFilter, deps: &ServerDeps) -> Result<Vec<TemplateData>> {
    let templates = WhatsAppTemplate::find_all(filter, &deps.db_pool).await?;
    Ok(templates.into_iter().map(TemplateData::from).collect())
}

pub async fn get_template(id: TemplateId, deps: &ServerDeps) -> Result<TemplateData> {
    Ok(WhatsAppTemplate::find_by_id(id, &deps.db_pool).await?.into())
}

pub async fn get_template_by_slug(slug: &str, deps: &ServerDeps) -> ApiResult<TemplateData> {
    WhatsAppTemplate::find_by_slug(slug, &deps.db_pool)
        .await?
        .map(TemplateData::from)
        .ok_or_else(|| ApiError::not_found("Template"))
}

pub async fn create_template(input: CreateTemplate, deps: &ServerDeps) -> ApiResult<TemplateData> {
    input.validate()?;

    let slug = input.resolved_slug();
    let template = WhatsAppTemplate::create(&slug, &input, false, &deps.db_pool).await?;

    info!(
        template_id = %template.id,
        slug = %template.slug,
        category = %template.category,
        is_default = template.is_default,
        "WhatsApp template created"
    );
    Ok(template.into())
}

pub async fn upsert_template(input: &CreateTemplate, pool: &PgPool) -> ApiResult<WhatsAppTemplate> {
    input.validate()?;
    Ok(WhatsAppTemplate::create(&input.resolved_slug(), input, true, pool).await?)
}

pub async fn update_template(
    id: TemplateId,
    input: UpdateTemplate,
    deps: &ServerDeps,
) -> ApiResult<TemplateData> {
    input.validate()?;

    let template = WhatsAppTemplate::update(id, &input, &deps.db_pool).await?;

    info!(template_id = %id, is_default = template.is_default, "WhatsApp template updated");
    Ok(template.into())
}

pub async fn delete_template(id: TemplateId, deps: &ServerDeps) -> ApiResult<()> {
    if !WhatsAppTemplate::delete(id, &deps.db_pool).await? {
        return Err(ApiError::not_found("Template"));
    }
    info!(template_id = %id, "WhatsApp template deleted");
    Ok(())
}

// =============================================================================
// Links
// =============================================================================

/// Message body in priority order: inline body, named template, category
/// default, general default, built-in text.
pub async fn select_template(
    request: &WhatsAppLinkRequest,
    pool: &PgPool,
) -> Result<(String, TemplateSource)> {
    if let Some(body) = &request.template_body {
        return Ok((body.clone(), TemplateSource::Inline));
    }

    if let Some(slug) = &request.template_slug {
        match WhatsAppTemplate::find_by_slug(slug, pool).await? {
            Some(t) => return Ok((t.body, TemplateSource::Template(t.slug))),
            None => warn!(slug = %slug, "WhatsApp template not found, using defaults"),
        }
    }

    let mut categories = vec![request.category];
    if request.category != TemplateCategory::General {
        categories.push(TemplateCategory::General);
    }
    for category in categories {
        if let Some(t) = WhatsAppTemplate::find_default(category, pool).await? {
            return Ok((t.body, TemplateSource::Template(t.slug)));
        }
    }

    Ok((BUILT_IN_TEMPLATE.to_string(), TemplateSource::BuiltIn))
}

/// Build a `wa.me` link. Inline `template_body` previews are for the
/// dashboard and need an admin session.
pub async fn build_link(
    request: WhatsAppLinkRequest,
    user: Option<&AuthUser>,
    deps: &ServerDeps,
) -> ApiResult<WhatsAppLinkData> {
    request.validate()?;
    if request.template_body.is_some() {
        require_admin(user)?;
    }

    let phone = request
        .phone
        .as_deref()
        .unwrap_or(&deps.site.whatsapp_phone)
        .trim();
    if phone.is_empty() {
        return Err(ApiError::Unavailable(
            "WhatsApp number is not configured".to_string(),
        ));
    }

    let url = request
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(|target| {
            tracking_url(
                &deps.site.site_url,
                target,
                request.utm_source.as_deref(),
                request.utm_campaign.as_deref(),
            )
        })
        .transpose()?;

    let (template, source) = select_template(&request, &deps.db_pool).await?;
    let vars = template_vars(
        request.item_title.as_deref(),
        url.as_deref(),
        request.utm_source.as_deref(),
        request.utm_campaign.as_deref(),
    );
    let message = substitute(&template, &vars, request.missing);
    let link = build_wa_link(phone, &message)?;

    debug!(source = ?source, "WhatsApp link built");
    Ok(WhatsAppLinkData {
        link,
        message,
        source,
    })
}
