//! Handlers for the `/comics` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use comicforge_core::error::CoreError;
use comicforge_core::types::{DbId, OwnerId};
use comicforge_db::models::comic::{Comic, CreateComic, UpdateComic};
use comicforge_db::repositories::ComicRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for listing comics.
#[derive(Debug, Deserialize)]
pub struct ListComicsQuery {
    pub owner_id: Option<OwnerId>,
}

/// GET /api/v1/comics?owner_id={uuid}
///
/// An absent `owner_id` is a guarded no-op: the response is an empty list,
/// not an error.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListComicsQuery>,
) -> AppResult<Json<DataResponse<Vec<Comic>>>> {
    let Some(owner_id) = query.owner_id else {
        return Ok(Json(DataResponse { data: Vec::new() }));
    };
    let comics = state.cache.comics_for_owner(&state.pool, owner_id).await?;
    Ok(Json(DataResponse {
        data: comics.as_ref().clone(),
    }))
}

/// POST /api/v1/comics
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateComic>,
) -> AppResult<(StatusCode, Json<Comic>)> {
    let comic = state.workshop.create_comic(input).await?;
    Ok((StatusCode::CREATED, Json(comic)))
}

/// GET /api/v1/comics/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Comic>> {
    let comic = ComicRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comic",
            id,
        }))?;
    Ok(Json(comic))
}

/// PUT /api/v1/comics/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateComic>,
) -> AppResult<Json<Comic>> {
    let comic = state.workshop.update_comic(id, input).await?;
    Ok(Json(comic))
}

/// POST /api/v1/comics/{id}/publish
pub async fn publish(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Comic>> {
    let comic = state.workshop.publish_comic(id).await?;
    Ok(Json(comic))
}

/// DELETE /api/v1/comics/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    state.workshop.delete_comic(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
