pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /comics                                      list (?owner_id=), create
/// /comics/{id}                                 get, update, delete
/// /comics/{id}/publish                         draft -> published (POST)
/// /comics/{id}/workspace                       aggregate view (GET)
/// /comics/{id}/export                          export download (GET)
/// /comics/{id}/session                         get, update session state
/// /comics/{id}/generate-script                 script generation (POST)
///
/// /comics/{comic_id}/panels                    list, create
/// /comics/{comic_id}/panels/next               add panel (POST)
/// /comics/{comic_id}/panels/{id}               get, update, delete
/// /comics/{comic_id}/panels/{id}/generate-image  image generation (POST)
///
/// /comics/{comic_id}/characters                list, create
/// /comics/{comic_id}/characters/{id}           get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // -- Comics --
        .route(
            "/comics",
            get(handlers::comic::list).post(handlers::comic::create),
        )
        .route(
            "/comics/{id}",
            get(handlers::comic::get_by_id)
                .put(handlers::comic::update)
                .delete(handlers::comic::delete),
        )
        .route("/comics/{id}/publish", post(handlers::comic::publish))
        // -- Workshop --
        .route("/comics/{id}/workspace", get(handlers::workshop::workspace))
        .route("/comics/{id}/export", get(handlers::workshop::export))
        .route(
            "/comics/{id}/session",
            get(handlers::workshop::get_session).put(handlers::workshop::update_session),
        )
        .route(
            "/comics/{id}/generate-script",
            post(handlers::workshop::generate_script),
        )
        // -- Panels --
        .route(
            "/comics/{comic_id}/panels",
            get(handlers::panel::list_by_comic).post(handlers::panel::create),
        )
        .route("/comics/{comic_id}/panels/next", post(handlers::panel::add_next))
        .route(
            "/comics/{comic_id}/panels/{id}",
            get(handlers::panel::get_by_id)
                .put(handlers::panel::update)
                .delete(handlers::panel::delete),
        )
        .route(
            "/comics/{comic_id}/panels/{id}/generate-image",
            post(handlers::workshop::generate_image),
        )
        // -- Characters --
        .route(
            "/comics/{comic_id}/characters",
            get(handlers::character::list_by_comic).post(handlers::character::create),
        )
        .route(
            "/comics/{comic_id}/characters/{id}",
            get(handlers::character::get_by_id)
                .put(handlers::character::update)
                .delete(handlers::character::delete),
        )
}
