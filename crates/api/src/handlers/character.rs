//! Handlers for the `/characters` resource.
//!
//! Characters are nested under comics:
//! `/comics/{comic_id}/characters[/{id}]`

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use comicforge_core::error::CoreError;
use comicforge_core::types::DbId;
use comicforge_db::models::character::{Character, CreateCharacter, UpdateCharacter};
use comicforge_db::repositories::CharacterRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/comics/{comic_id}/characters
///
/// Ordered by creation time ascending; reads through the scope cache.
pub async fn list_by_comic(
    State(state): State<AppState>,
    Path(comic_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Character>>>> {
    let characters = state
        .cache
        .characters_for_comic(&state.pool, comic_id)
        .await?;
    Ok(Json(DataResponse {
        data: characters.as_ref().clone(),
    }))
}

/// POST /api/v1/comics/{comic_id}/characters
///
/// Overrides `input.comic_id` with the value from the URL path. An empty
/// name is rejected by the workshop service before any store call.
pub async fn create(
    State(state): State<AppState>,
    Path(comic_id): Path<DbId>,
    Json(mut input): Json<CreateCharacter>,
) -> AppResult<(StatusCode, Json<Character>)> {
    input.comic_id = comic_id;
    let character = state.workshop.create_character(input).await?;
    Ok((StatusCode::CREATED, Json(character)))
}

/// GET /api/v1/comics/{comic_id}/characters/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((_comic_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Character>> {
    let character = CharacterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;
    Ok(Json(character))
}

/// PUT /api/v1/comics/{comic_id}/characters/{id}
pub async fn update(
    State(state): State<AppState>,
    Path((comic_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateCharacter>,
) -> AppResult<Json<Character>> {
    let character = state.workshop.update_character(comic_id, id, input).await?;
    Ok(Json(character))
}

/// DELETE /api/v1/comics/{comic_id}/characters/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((comic_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    state.workshop.delete_character(comic_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
