use crate::common::auth::AuthUser;
use crate::domains::auth::JwtService;
use axum::{middleware::Next, response::Response};
use std::sync::Arc;
use tracing::debug;

/// JWT authentication middleware
///
/// Verifies the bearer token and adds `AuthUser` to request extensions.
/// Requests without a valid token continue anonymously; admin routes reject
/// them through the `AdminUser` extractor.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    if let Some(user) = extract_auth_user(&request, &jwt_service) {
        debug!(user_id = %user.user_id, is_admin = user.is_admin, "Authenticated request");
        request.extensions_mut().insert(user);
    }

    next.run(request).await
}

/// Extract and verify JWT token from request
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<AuthUser> {
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    // Accept both "Bearer <token>" and a raw token
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    match jwt_service.verify_token(token) {
        Ok(claims) => Some(claims.into_auth_user()),
        Err(e) => {
            debug!(error = %e, "Rejected session token");
            None
        }
    }
}
