use axum::{routing::get, Extension, Json, Router};
use serde::Serialize;

use crate::common::auth::AuthUser;
use crate::kernel::ServerDeps;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session: Option<AuthUser>,
}

pub fn router() -> Router<ServerDeps> {
    Router::new().route("/auth/session", get(get_session))
}

/// Current session, or `null` for anonymous callers.
async fn get_session(user: Option<Extension<AuthUser>>) -> Json<SessionResponse> {
    Json(SessionResponse {
        session: user.map(|Extension(u)| u),
    })
}
