//! Integration tests for registration, login, and the access gate.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, patch_json, post_json, seed_user_and_token};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_returns_201_without_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/users",
        serde_json::json!({
            "full_name": "Ada Lovelace",
            "email": "ada@example.com",
            "password": "password123",
        }),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["full_name"], "Ada Lovelace");
    assert_eq!(json["data"]["email"], "ada@example.com");
    assert_eq!(json["data"]["enabled"], true);
    assert!(json["data"]["id"].is_number());
    // The password hash must never appear in responses.
    assert!(json["data"].get("password_hash").is_none());
    assert!(json["data"].get("password").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_email_returns_409(pool: PgPool) {
    let body = serde_json::json!({
        "full_name": "First",
        "email": "dup@example.com",
        "password": "password123",
    });

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/users", body.clone(), None).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/users", body, None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_rejects_short_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/users",
        serde_json::json!({
            "full_name": "Short",
            "email": "short@example.com",
            "password": "abc",
        }),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_rejects_invalid_email(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/users",
        serde_json::json!({
            "full_name": "No At Sign",
            "email": "not-an-email",
            "password": "password123",
        }),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_returns_working_token(pool: PgPool) {
    let (user_id, _) = seed_user_and_token(&pool, "login@example.com").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({"email": "login@example.com", "password": "password123"}),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["token_type"], "Bearer");
    assert_eq!(json["user"]["id"], user_id);
    let token = json["access_token"].as_str().unwrap().to_string();

    // The freshly issued token must pass the gate.
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/users/{user_id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password_returns_401(pool: PgPool) {
    seed_user_and_token(&pool, "wrongpw@example.com").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({"email": "wrongpw@example.com", "password": "not-the-password"}),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHENTICATED");
    assert_eq!(json["error"], "Invalid email or password");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_unknown_email_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({"email": "nobody@example.com", "password": "password123"}),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_disabled_user_returns_401(pool: PgPool) {
    let (user_id, token) = seed_user_and_token(&pool, "disabled@example.com").await;

    // Disable the account through the API.
    let app = common::build_test_app(pool.clone());
    let response = patch_json(
        app,
        &format!("/api/v1/users/{user_id}"),
        serde_json::json!({"enabled": false}),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({"email": "disabled@example.com", "password": "password123"}),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Access gate
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_gated_endpoint_without_token_returns_401(pool: PgPool) {
    let (user_id, _) = seed_user_and_token(&pool, "gate@example.com").await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/users/{user_id}"), None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHENTICATED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_gated_endpoint_with_garbage_token_returns_401(pool: PgPool) {
    let (user_id, _) = seed_user_and_token(&pool, "garbage@example.com").await;

    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/users/{user_id}"),
        Some("not-a-real-token"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_token_of_deleted_user_is_rejected(pool: PgPool) {
    let (user_id, token) = seed_user_and_token(&pool, "gone@example.com").await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/users/{user_id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The token is still validly signed but its subject no longer exists.
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/users/{user_id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_token_of_disabled_user_is_rejected(pool: PgPool) {
    let (user_id, token) = seed_user_and_token(&pool, "frozen@example.com").await;

    let app = common::build_test_app(pool.clone());
    let response = patch_json(
        app,
        &format!("/api/v1/users/{user_id}"),
        serde_json::json!({"enabled": false}),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Disabling takes effect immediately, even for already-issued tokens.
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/users/{user_id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
