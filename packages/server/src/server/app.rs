//! Application setup and server configuration.

use std::time::Duration;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::get,
    Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domains;
use crate::kernel::ServerDeps;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::health_handler;

/// Router-level options that do not belong in `ServerDeps`
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Empty means any origin (development)
    pub allowed_origins: Vec<String>,
    /// Per-IP rate limiting on `/api`. Needs connect info or proxy headers,
    /// so in-process tests turn it off.
    pub rate_limit: bool,
    pub request_timeout: Duration,
}

impl HttpOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            allowed_origins: config.allowed_origins.clone(),
            rate_limit: config.rate_limit_enabled,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            rate_limit: false,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// All `/api` routes, one router per content domain.
pub fn api_router() -> Router<ServerDeps> {
    Router::new()
        .merge(domains::auth::router())
        .merge(domains::home::router())
        .merge(domains::tag::router())
        .merge(domains::destinations::router())
        .merge(domains::packages::router())
        .merge(domains::offers::router())
        .merge(domains::events::router())
        .merge(domains::departments::router())
        .merge(domains::testimonials::router())
        .merge(domains::blog::router())
        .merge(domains::fixed_departures::router())
        .merge(domains::whatsapp::router())
        .merge(domains::uploads::router())
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps, options: &HttpOptions) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allow_origin(&options.allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    let mut api = api_router();

    if options.rate_limit {
        // 10 requests/sec per IP with bursts of 30 (admin forms fire several calls at once)
        let rate_limit_config = std::sync::Arc::new(
            GovernorConfigBuilder::default()
                .per_second(10)
                .burst_size(30)
                .use_headers()
                .finish()
                .expect("Rate limiter configuration is valid"),
        );
        api = api.layer(GovernorLayer {
            config: rate_limit_config,
        });
    }

    let jwt_service = deps.jwt_service.clone();

    Router::new()
        .nest("/api", api)
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        }))
        .layer(cors)
        .layer(TimeoutLayer::new(options.request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(deps)
}

fn allow_origin(origins: &[String]) -> AllowOrigin {
    if origins.is_empty() {
        return Any.into();
    }
    AllowOrigin::list(
        origins
            .iter()
            .filter_map(|origin| origin.parse::<HeaderValue>().ok()),
    )
}
