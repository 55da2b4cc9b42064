//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the real application router (same middleware stack as `main.rs`)
//! and drives it with `tower::ServiceExt::oneshot`, so no TCP listener is
//! needed. Request helpers take an optional bearer token since most
//! mutation endpoints are gated.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use amiibox_api::auth::jwt::{generate_access_token, JwtConfig};
use amiibox_api::auth::password::hash_password;
use amiibox_api::config::ServerConfig;
use amiibox_api::router::build_app_router;
use amiibox_api::state::AppState;
use amiibox_db::models::series::{CreateSeries, Series};
use amiibox_db::models::user::CreateUser;
use amiibox_db::repositories::{SeriesRepo, UserRepo};

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-do-not-use-in-prod".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response<Body> {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn patch_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response<Body> {
    send(app, Method::PATCH, uri, token, Some(body)).await
}

pub async fn put(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::PUT, uri, token, None).await
}

pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::DELETE, uri, token, None).await
}

/// Parse a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Insert a user directly and mint a valid access token for them.
///
/// The user's password is `password123` (hashed), matching what the
/// login tests send.
pub async fn seed_user_and_token(pool: &PgPool, email: &str) -> (i64, String) {
    let password_hash = hash_password("password123").unwrap();
    let user = UserRepo::create(
        pool,
        &CreateUser {
            full_name: "Test User".to_string(),
            email: email.to_string(),
            password_hash,
        },
    )
    .await
    .unwrap();

    let token = generate_access_token(user.id, &test_config().jwt).unwrap();
    (user.id, token)
}

/// Insert a series directly (there is no public series-create endpoint).
pub async fn seed_series(pool: &PgPool, name: &str) -> Series {
    SeriesRepo::create(
        pool,
        &CreateSeries {
            name: name.to_string(),
        },
    )
    .await
    .unwrap()
}
