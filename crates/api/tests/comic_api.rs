//! HTTP-level integration tests for the `/comics` resource.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router.
//! Each test gets a fresh migrated database from `#[sqlx::test]`.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post, post_json, put_json};
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Test: listing without an owner is a guarded no-op
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_without_owner_returns_empty(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/comics").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// Test: POST + GET + list roundtrip
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_and_fetch_comic(pool: PgPool) {
    let owner_id = Uuid::new_v4();
    let app = build_test_app(pool);

    let create_resp = post_json(
        app.clone(),
        "/api/v1/comics",
        serde_json::json!({
            "title": "Starfall",
            "description": "A space western",
            "genre": "sci-fi",
            "owner_id": owner_id,
            "tags": ["space", "western"]
        }),
    )
    .await;
    assert_eq!(create_resp.status(), StatusCode::CREATED);

    let created = body_json(create_resp).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["title"], "Starfall");
    assert_eq!(created["status"], "draft");
    assert_eq!(created["owner_id"], owner_id.to_string());
    assert_eq!(created["tags"], serde_json::json!(["space", "western"]));
    assert!(created["published_at"].is_null());

    // GET by id
    let get_resp = get(app.clone(), &format!("/api/v1/comics/{id}")).await;
    assert_eq!(get_resp.status(), StatusCode::OK);
    let fetched = body_json(get_resp).await;
    assert_eq!(fetched["id"], id);
    assert_eq!(fetched["title"], "Starfall");

    // List for the owner includes it
    let list_resp = get(app, &format!("/api/v1/comics?owner_id={owner_id}")).await;
    assert_eq!(list_resp.status(), StatusCode::OK);
    let list = body_json(list_resp).await;
    let data = list["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], id);
}

// ---------------------------------------------------------------------------
// Test: listing is scoped to the requested owner
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_is_scoped_per_owner(pool: PgPool) {
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    common::seed_comic(&pool, "Alice's Comic", Some(alice)).await;
    common::seed_comic(&pool, "Bob's Comic", Some(bob)).await;

    let app = build_test_app(pool);
    let list = body_json(get(app, &format!("/api/v1/comics?owner_id={alice}")).await).await;
    let data = list["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["title"], "Alice's Comic");
}

// ---------------------------------------------------------------------------
// Test: GET missing comic returns 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn get_missing_comic_returns_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/comics/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: PUT applies a partial update and bumps updated_at
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn update_comic_partial(pool: PgPool) {
    let owner_id = Uuid::new_v4();
    let id = common::seed_comic(&pool, "Before", Some(owner_id)).await;

    let app = build_test_app(pool);
    let update_resp = put_json(
        app.clone(),
        &format!("/api/v1/comics/{id}"),
        serde_json::json!({ "title": "After", "genre": "noir" }),
    )
    .await;
    assert_eq!(update_resp.status(), StatusCode::OK);

    let updated = body_json(update_resp).await;
    assert_eq!(updated["title"], "After");
    assert_eq!(updated["genre"], "noir");
    // Untouched fields survive a partial update.
    assert_eq!(updated["status"], "draft");
    assert_ne!(updated["updated_at"], updated["created_at"]);

    // The owner's cached list reflects the update.
    let list = body_json(get(app, &format!("/api/v1/comics?owner_id={owner_id}")).await).await;
    assert_eq!(list["data"][0]["title"], "After");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_missing_comic_returns_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = put_json(
        app,
        "/api/v1/comics/999999",
        serde_json::json!({ "title": "Ghost" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: publish is one-way and idempotence is a conflict
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn publish_comic_once(pool: PgPool) {
    let id = common::seed_comic(&pool, "Launch Day", None).await;

    let app = build_test_app(pool);
    let publish_resp = post(app.clone(), &format!("/api/v1/comics/{id}/publish")).await;
    assert_eq!(publish_resp.status(), StatusCode::OK);

    let published = body_json(publish_resp).await;
    assert_eq!(published["status"], "published");
    assert!(published["published_at"].is_string());

    // Second publish is a conflict, not a silent re-stamp.
    let again = post(app, &format!("/api/v1/comics/{id}/publish")).await;
    assert_eq!(again.status(), StatusCode::CONFLICT);
    let json = body_json(again).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn publish_missing_comic_returns_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post(app, "/api/v1/comics/999999/publish").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: DELETE removes the comic and its listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_comic(pool: PgPool) {
    let owner_id = Uuid::new_v4();
    let id = common::seed_comic(&pool, "Short Lived", Some(owner_id)).await;

    let app = build_test_app(pool);
    // Warm the cached list, then delete through the same app so the
    // invalidation is observable.
    let before = body_json(get(app.clone(), &format!("/api/v1/comics?owner_id={owner_id}")).await)
        .await;
    assert_eq!(before["data"].as_array().unwrap().len(), 1);

    let delete_resp = delete(app.clone(), &format!("/api/v1/comics/{id}")).await;
    assert_eq!(delete_resp.status(), StatusCode::NO_CONTENT);

    let get_resp = get(app.clone(), &format!("/api/v1/comics/{id}")).await;
    assert_eq!(get_resp.status(), StatusCode::NOT_FOUND);

    let after = body_json(get(app, &format!("/api/v1/comics?owner_id={owner_id}")).await).await;
    assert_eq!(after["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_missing_comic_returns_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = delete(app, "/api/v1/comics/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: health endpoint
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn health_check(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}
