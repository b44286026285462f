//! Shared test harness: builds the full application router with the same
//! middleware stack as `main.rs`, plus small request/response helpers.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use comicforge_api::config::ServerConfig;
use comicforge_api::routes;
use comicforge_api::state::AppState;
use comicforge_api::workshop::WorkshopService;
use comicforge_core::numbering::PanelNumbering;
use comicforge_db::cache::ScopeCache;
use comicforge_events::NotificationBus;
use comicforge_gen::GenClient;

/// Build a test `ServerConfig` pointing at the given generation backend.
pub fn test_config(generation_base_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        generation_base_url: generation_base_url.to_string(),
        panel_numbering: PanelNumbering::default(),
    }
}

/// Build the application router plus the notification bus backing it.
///
/// Mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses. The bus is returned so tests can
/// subscribe and assert on published notifications.
pub fn build_test_parts(
    pool: PgPool,
    generation_base_url: &str,
) -> (Router, Arc<NotificationBus>) {
    build_test_parts_with_numbering(pool, generation_base_url, PanelNumbering::default())
}

/// Same as [`build_test_parts`], with an explicit panel numbering policy.
pub fn build_test_parts_with_numbering(
    pool: PgPool,
    generation_base_url: &str,
    numbering: PanelNumbering,
) -> (Router, Arc<NotificationBus>) {
    let mut config = test_config(generation_base_url);
    config.panel_numbering = numbering;

    let cache = Arc::new(ScopeCache::new());
    let bus = Arc::new(NotificationBus::default());
    let gen = Arc::new(GenClient::new(config.generation_base_url.clone()));
    let workshop = Arc::new(WorkshopService::new(
        pool.clone(),
        Arc::clone(&cache),
        gen,
        Arc::clone(&bus),
        config.panel_numbering,
    ));

    let state = AppState {
        pool,
        config: Arc::new(config),
        cache,
        bus: Arc::clone(&bus),
        workshop,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    let router = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state);

    (router, bus)
}

/// Build the application router with a generation backend that is never
/// reachable. Tests that exercise generation should use [`build_test_parts`]
/// with a mock server URL instead.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_parts(pool, "http://127.0.0.1:9").0
}

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: Router, uri: &str) -> Response {
    send(app, Method::POST, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a comic via the API and return its id. The owner is a fresh
/// random UUID unless one is supplied.
pub async fn seed_comic(pool: &PgPool, title: &str, owner_id: Option<uuid::Uuid>) -> i64 {
    let owner_id = owner_id.unwrap_or_else(uuid::Uuid::new_v4);
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/comics",
        serde_json::json!({
            "title": title,
            "owner_id": owner_id,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
