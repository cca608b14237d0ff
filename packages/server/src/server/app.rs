//! Application setup and server configuration.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domains::auth::{CsrfService, JwtService, CSRF_HEADER};
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{
    create_family_request, health_handler, list_requests, new_family_request, show_request,
    validate_family_request_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: Arc<JwtService>,
    pub csrf: Arc<CsrfService>,
    pub allow_forgery_protection: bool,
    pub default_item_quantity: i32,
}

impl AppState {
    pub fn new(pool: PgPool, config: &Config) -> Result<Self> {
        Ok(Self {
            db_pool: pool,
            jwt_service: Arc::new(JwtService::new(&config.jwt_secret, config.jwt_issuer.clone())),
            csrf: Arc::new(CsrfService::new(&config.csrf_secret)?),
            allow_forgery_protection: config.allow_forgery_protection,
            default_item_quantity: config.default_item_quantity,
        })
    }
}

/// Build the Axum application router
pub fn build_app(pool: PgPool, config: &Config) -> Result<Router> {
    let app_state = AppState::new(pool, config)?;

    let cors = CorsLayer::new()
        .allow_origin(allow_origin(&config.allowed_origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, HeaderName::from_static(CSRF_HEADER)]);

    // Clone jwt_service for middleware closure
    let jwt_service_for_middleware = app_state.jwt_service.clone();

    let app = Router::new()
        .route("/health", get(health_handler))
        .route(
            "/partners/family_requests/new",
            get(new_family_request),
        )
        .route("/partners/family_requests", post(create_family_request))
        .route(
            "/partners/family_requests/validate",
            post(validate_family_request_handler),
        )
        .route("/partners/requests", get(list_requests))
        .route("/partners/requests/:id", get(show_request))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service_for_middleware.clone(), req, next)
        }))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn allow_origin(origins: &[String]) -> AllowOrigin {
    if origins.is_empty() {
        return AllowOrigin::from(Any);
    }

    let values: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid allowed origin");
                None
            }
        })
        .collect();

    AllowOrigin::list(values)
}
