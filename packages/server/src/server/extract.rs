//! Request extractors shared by domain routes.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use serde::Deserialize;

use crate::common::auth::{require_admin, AuthUser};
use crate::server::ApiError;

/// Admin caller, populated from the JWT middleware's `AuthUser`.
///
/// Rejects with 401 when no valid token was sent and 403 for non-admins.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = require_admin(parts.extensions.get::<AuthUser>())?;
        Ok(AdminUser(user.clone()))
    }
}

/// Whether unpublished rows are visible to this request.
///
/// Anonymous visitors only ever see published content; admins opt in with
/// `include_unpublished=true` so the dashboard can list drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub include_unpublished: bool,
}

impl Visibility {
    pub fn public() -> Self {
        Self {
            include_unpublished: false,
        }
    }

    pub fn resolve(user: Option<&AuthUser>, requested: Option<bool>) -> Self {
        let is_admin = user.map(|u| u.is_admin).unwrap_or(false);
        Self {
            include_unpublished: is_admin && requested.unwrap_or(false),
        }
    }

    /// Single-record lookups: admins always see drafts so the dashboard can
    /// open them for editing.
    pub fn for_record(user: Option<&AuthUser>) -> Self {
        Self::resolve(user, Some(true))
    }

    /// Whether a row with this `published` flag may be returned.
    pub fn allows(&self, published: bool) -> bool {
        published || self.include_unpublished
    }

    /// SQL parameter for `($n OR published)` filters.
    pub fn include_unpublished(&self) -> bool {
        self.include_unpublished
    }
}

/// `?include_unpublished=` on detail endpoints
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct VisibilityQuery {
    pub include_unpublished: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::UserId;

    fn user(is_admin: bool) -> AuthUser {
        AuthUser {
            user_id: UserId::new(),
            email: "staff@agency.test".to_string(),
            is_admin,
        }
    }

    #[test]
    fn only_admins_can_request_drafts() {
        assert!(Visibility::resolve(Some(&user(true)), Some(true)).include_unpublished());
        assert!(!Visibility::resolve(Some(&user(true)), None).include_unpublished());
        assert!(!Visibility::resolve(Some(&user(false)), Some(true)).include_unpublished());
        assert!(!Visibility::resolve(None, Some(true)).include_unpublished());
    }

    #[test]
    fn record_lookups_hide_drafts_from_visitors() {
        assert!(Visibility::for_record(Some(&user(true))).allows(false));
        assert!(!Visibility::for_record(Some(&user(false))).allows(false));
        assert!(!Visibility::for_record(None).allows(false));
        assert!(Visibility::for_record(None).allows(true));
    }
}
