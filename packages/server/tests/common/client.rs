//! HTTP client for integration testing.
//!
//! Drives the real router with `tower::ServiceExt::oneshot`, no socket involved.

use axum::body::{Body, Bytes};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use partner_core::domains::auth::{CsrfService, JwtService};
use partner_core::domains::partners::models::PartnerUser;
use partner_core::server::build_app;
use partner_core::server::flash::Flash;
use partner_core::Config;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use super::{TEST_CSRF_SECRET, TEST_JWT_ISSUER, TEST_JWT_SECRET};

/// Response captured for assertions
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }

    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }

    /// Flash message set by this response
    pub fn flash(&self) -> Option<Flash> {
        let cookie = self.headers.get(SET_COOKIE)?.to_str().ok()?;
        let pair = cookie.split(';').next()?;
        Flash::from_cookie_value(pair.strip_prefix("flash=")?)
    }

    /// Raw cookie pair to send back on the next request
    pub fn flash_cookie(&self) -> Option<String> {
        let cookie = self.headers.get(SET_COOKIE)?.to_str().ok()?;
        cookie.split(';').next().map(str::to_string)
    }

    pub fn is_redirect_to(&self, path: &str) -> bool {
        self.status.is_redirection() && self.location() == Some(path)
    }
}

/// Client for executing requests against the app in tests.
pub struct TestClient {
    app: Router,
    bearer: Option<String>,
    authenticity_token: Option<String>,
}

impl TestClient {
    pub fn signed_in(pool: PgPool, config: Config, user: &PartnerUser) -> Self {
        let jwt = JwtService::new(TEST_JWT_SECRET, TEST_JWT_ISSUER.to_string());
        let token = jwt
            .create_token(
                user.id.into_uuid(),
                user.partner_id.into_uuid(),
                user.email.clone(),
            )
            .expect("Failed to create test token");

        Self {
            app: build_app(pool, &config).expect("Failed to build app"),
            bearer: Some(token),
            authenticity_token: Some(CsrfService::new(TEST_CSRF_SECRET)
                    .expect("Failed to create CSRF service")
                    .token_for(user.id)),
        }
    }

    pub fn anonymous(pool: PgPool, config: Config) -> Self {
        Self {
            app: build_app(pool, &config).expect("Failed to build app"),
            bearer: None,
            authenticity_token: None,
        }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.get_with_cookie(path, None).await
    }

    pub async fn get_with_cookie(&self, path: &str, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(token) = &self.bearer {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }

        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// POST a form including this client's authenticity token
    pub async fn post_form(&self, path: &str, fields: &[(String, String)]) -> TestResponse {
        let mut fields = fields.to_vec();
        if let Some(token) = &self.authenticity_token {
            fields.push(("authenticity_token".to_string(), token.clone()));
        }
        self.post_form_without_token(path, &fields).await
    }

    /// POST a form exactly as given
    pub async fn post_form_without_token(
        &self,
        path: &str,
        fields: &[(String, String)],
    ) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(token) = &self.bearer {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    /// POST with no body and no content type
    pub async fn post_empty(&self, path: &str) -> TestResponse {
        let mut builder = Request::builder().method("POST").uri(path);
        if let Some(token) = &self.bearer {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        self.send(builder.body(Body::empty()).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router call failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            headers,
            body,
        }
    }
}
