//! Handlers for the `/panels` resource.
//!
//! Panels are nested under comics:
//! `/comics/{comic_id}/panels[/{id}]`

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use comicforge_core::error::CoreError;
use comicforge_core::types::DbId;
use comicforge_db::models::panel::{CreatePanel, Panel, UpdatePanel};
use comicforge_db::repositories::PanelRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/comics/{comic_id}/panels
///
/// Ordered by `panel_number` ascending; reads through the scope cache.
pub async fn list_by_comic(
    State(state): State<AppState>,
    Path(comic_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Panel>>>> {
    let panels = state.cache.panels_for_comic(&state.pool, comic_id).await?;
    Ok(Json(DataResponse {
        data: panels.as_ref().clone(),
    }))
}

/// POST /api/v1/comics/{comic_id}/panels
///
/// Overrides `input.comic_id` with the value from the URL path.
pub async fn create(
    State(state): State<AppState>,
    Path(comic_id): Path<DbId>,
    Json(mut input): Json<CreatePanel>,
) -> AppResult<(StatusCode, Json<Panel>)> {
    input.comic_id = comic_id;
    let panel = state.workshop.create_panel(input).await?;
    Ok((StatusCode::CREATED, Json(panel)))
}

/// POST /api/v1/comics/{comic_id}/panels/next
///
/// The workshop "add panel" action: the next number comes from the
/// configured numbering policy and the script is seeded with a placeholder.
pub async fn add_next(
    State(state): State<AppState>,
    Path(comic_id): Path<DbId>,
) -> AppResult<(StatusCode, Json<Panel>)> {
    let panel = state.workshop.add_panel(comic_id).await?;
    Ok((StatusCode::CREATED, Json(panel)))
}

/// GET /api/v1/comics/{comic_id}/panels/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((_comic_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Panel>> {
    let panel = PanelRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Panel",
            id,
        }))?;
    Ok(Json(panel))
}

/// PUT /api/v1/comics/{comic_id}/panels/{id}
pub async fn update(
    State(state): State<AppState>,
    Path((comic_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdatePanel>,
) -> AppResult<Json<Panel>> {
    let panel = state.workshop.update_panel(comic_id, id, input).await?;
    Ok(Json(panel))
}

/// DELETE /api/v1/comics/{comic_id}/panels/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((comic_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    state.workshop.delete_panel(comic_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
