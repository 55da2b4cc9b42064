//! Integration tests for the series and figures endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, patch_json, post_json, seed_series, seed_user_and_token};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_series_is_public(pool: PgPool) {
    seed_series(&pool, "Super Smash Bros.").await;
    seed_series(&pool, "Animal Crossing").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/series", None).await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "Super Smash Bros.");
    assert_eq!(items[1]["name"], "Animal Crossing");
}

// ---------------------------------------------------------------------------
// Figures
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_figure_embeds_series(pool: PgPool) {
    let series = seed_series(&pool, "The Legend of Zelda").await;
    let (_, token) = seed_user_and_token(&pool, "curator@example.com").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/figures",
        serde_json::json!({
            "name": "Link",
            "image": "https://example.com/link.png",
            "series_id": series.id,
        }),
        Some(&token),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Link");
    assert_eq!(json["data"]["series"]["id"], series.id);
    assert_eq!(json["data"]["series"]["name"], "The Legend of Zelda");
    // The raw foreign key is not exposed; the resolved series is.
    assert!(json["data"].get("series_id").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_figure_requires_auth(pool: PgPool) {
    let series = seed_series(&pool, "Metroid").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/figures",
        serde_json::json!({
            "name": "Samus",
            "image": "https://example.com/samus.png",
            "series_id": series.id,
        }),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The rejected write must not have created anything.
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/figures", None).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_figure_with_dangling_series_returns_400(pool: PgPool) {
    let (_, token) = seed_user_and_token(&pool, "curator@example.com").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/figures",
        serde_json::json!({
            "name": "Orphan",
            "image": "https://example.com/orphan.png",
            "series_id": 999_999,
        }),
        Some(&token),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_REFERENCE");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_figure_with_empty_name_returns_400(pool: PgPool) {
    let series = seed_series(&pool, "Kirby").await;
    let (_, token) = seed_user_and_token(&pool, "curator@example.com").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/figures",
        serde_json::json!({
            "name": "   ",
            "image": "https://example.com/kirby.png",
            "series_id": series.id,
        }),
        Some(&token),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_figure_is_public_and_matches_created(pool: PgPool) {
    let series = seed_series(&pool, "Splatoon").await;
    let (_, token) = seed_user_and_token(&pool, "curator@example.com").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/figures",
        serde_json::json!({
            "name": "Inkling Girl",
            "image": "https://example.com/inkling.png",
            "series_id": series.id,
        }),
        Some(&token),
    )
    .await;
    let created = body_json(response).await;
    let id = created["data"]["id"].as_i64().unwrap();

    // No token: reads are public.
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/figures/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = body_json(response).await;
    assert_eq!(fetched["data"], created["data"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_nonexistent_figure_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/figures/999999", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_patch_figure_applies_only_supplied_fields(pool: PgPool) {
    let series = seed_series(&pool, "Fire Emblem").await;
    let (_, token) = seed_user_and_token(&pool, "curator@example.com").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/figures",
        serde_json::json!({
            "name": "Marth",
            "image": "https://example.com/marth.png",
            "series_id": series.id,
        }),
        Some(&token),
    )
    .await;
    let created = body_json(response).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = patch_json(
        app,
        &format!("/api/v1/figures/{id}"),
        serde_json::json!({"name": "Marth (v2)"}),
        Some(&token),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Marth (v2)");
    // Unsupplied fields survive the patch.
    assert_eq!(json["data"]["image"], "https://example.com/marth.png");
    assert_eq!(json["data"]["series"]["id"], series.id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_patch_figure_to_dangling_series_returns_400(pool: PgPool) {
    let series = seed_series(&pool, "Pikmin").await;
    let (_, token) = seed_user_and_token(&pool, "curator@example.com").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/figures",
        serde_json::json!({
            "name": "Olimar",
            "image": "https://example.com/olimar.png",
            "series_id": series.id,
        }),
        Some(&token),
    )
    .await;
    let created = body_json(response).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = patch_json(
        app,
        &format!("/api/v1/figures/{id}"),
        serde_json::json!({"series_id": 424242}),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The failed patch left the figure untouched.
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/figures/{id}"), None).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["series"]["id"], series.id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_figure_then_get_returns_404(pool: PgPool) {
    let series = seed_series(&pool, "Mario").await;
    let (_, token) = seed_user_and_token(&pool, "curator@example.com").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/figures",
        serde_json::json!({
            "name": "Mario",
            "image": "https://example.com/mario.png",
            "series_id": series.id,
        }),
        Some(&token),
    )
    .await;
    let created = body_json(response).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/figures/{id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/figures/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // A second delete is not idempotent: the row is gone.
    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/v1/figures/{id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_figures_preserves_insertion_order(pool: PgPool) {
    let series = seed_series(&pool, "Yoshi").await;
    let (_, token) = seed_user_and_token(&pool, "curator@example.com").await;

    for name in ["Yoshi", "Poochy", "Boo"] {
        let app = common::build_test_app(pool.clone());
        post_json(
            app,
            "/api/v1/figures",
            serde_json::json!({
                "name": name,
                "image": format!("https://example.com/{name}.png"),
                "series_id": series.id,
            }),
            Some(&token),
        )
        .await;
    }

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/figures", None).await;
    let json = body_json(response).await;

    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Yoshi", "Poochy", "Boo"]);
}
