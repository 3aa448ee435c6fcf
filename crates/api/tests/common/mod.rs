#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use taller_api::auth::jwt::{generate_access_token, JwtConfig};
use taller_api::config::ServerConfig;
use taller_api::router::build_app_router;
use taller_api::state::AppState;
use taller_db::repositories::{NoRelations, RelationGuard, SchemaRepo};

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        seed_workshops: false,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router against `pool`, with the production
/// middleware stack and a guard that never blocks deletes.
pub async fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_guard(pool, Arc::new(NoRelations)).await
}

/// Like [`build_test_app`] but with a custom pre-delete guard.
pub async fn build_test_app_with_guard(pool: PgPool, guard: Arc<dyn RelationGuard>) -> Router {
    let config = test_config();
    let schema = SchemaRepo::load_catalog(&pool).await.unwrap();

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        schema: Arc::new(schema),
        relation_guard: guard,
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// Bearer token for a non-admin user holding `permissions`.
pub fn token_with(permissions: &[&str]) -> String {
    generate_access_token(1, "staff", permissions, &test_config().jwt).unwrap()
}

/// Bearer token for an admin (implicitly holds every permission).
pub fn admin_token() -> String {
    generate_access_token(1, "admin", &[], &test_config().jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, token: Option<&str>, body: Option<serde_json::Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// Unauthenticated GET.
pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, token: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, token: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// POST a raw body, optionally without a content type.
pub async fn post_raw(app: Router, uri: &str, token: &str, content_type: Option<&str>, body: &str) -> Response {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"));
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    app.oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
