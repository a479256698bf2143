//! Request identity for the admin API.
//!
//! The JWT middleware decodes bearer tokens into an [`AuthUser`] and stores it
//! in request extensions; handlers that mutate content call [`require_admin`].

mod errors;

pub use errors::AuthError;

use serde::Serialize;

use crate::common::UserId;

/// Authenticated staff member, decoded from the session token
#[derive(Clone, Debug, Serialize)]
pub struct AuthUser {
    pub user_id: UserId,
    pub email: String,
    pub is_admin: bool,
}

/// Resolve the caller to an admin or fail with the matching [`AuthError`].
pub fn require_admin(user: Option<&AuthUser>) -> Result<&AuthUser, AuthError> {
    let user = user.ok_or(AuthError::AuthenticationRequired)?;
    if !user.is_admin {
        return Err(AuthError::AdminRequired);
    }
    Ok(user)
}
