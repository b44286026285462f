//! Handlers for workshop actions on one open comic: the aggregate view,
//! AI generation, session state, and export.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use comicforge_core::export::EXPORT_FILE_NAME;
use comicforge_core::session::WorkshopSession;
use comicforge_core::types::DbId;
use comicforge_db::aggregate::ComicAggregate;
use comicforge_db::models::panel::Panel;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workshop::UpdateSession;

/// GET /api/v1/comics/{id}/workspace
///
/// The aggregate read view: comic + ordered panels + character roster,
/// fetched concurrently.
pub async fn workspace(
    State(state): State<AppState>,
    Path(comic_id): Path<DbId>,
) -> AppResult<Json<DataResponse<ComicAggregate>>> {
    let aggregate = state.workshop.workspace(comic_id).await?;
    Ok(Json(DataResponse { data: aggregate }))
}

/// Request body for image generation.
#[derive(Debug, Deserialize)]
pub struct GenerateImageRequest {
    pub prompt: String,
}

/// POST /api/v1/comics/{comic_id}/panels/{id}/generate-image
///
/// On success the panel is returned with `image_url` and `ai_prompt` set.
pub async fn generate_image(
    State(state): State<AppState>,
    Path((comic_id, panel_id)): Path<(DbId, DbId)>,
    Json(input): Json<GenerateImageRequest>,
) -> AppResult<Json<Panel>> {
    let panel = state
        .workshop
        .generate_image(comic_id, panel_id, &input.prompt)
        .await?;
    Ok(Json(panel))
}

/// Request body for script generation.
#[derive(Debug, Deserialize)]
pub struct GenerateScriptRequest {
    pub prompt: String,
}

/// Generated script payload. The text is not persisted anywhere.
#[derive(Debug, Serialize)]
pub struct GeneratedScript {
    pub script: String,
}

/// POST /api/v1/comics/{id}/generate-script
pub async fn generate_script(
    State(state): State<AppState>,
    Path(comic_id): Path<DbId>,
    Json(input): Json<GenerateScriptRequest>,
) -> AppResult<Json<DataResponse<GeneratedScript>>> {
    let script = state
        .workshop
        .generate_script(comic_id, &input.prompt)
        .await?;
    Ok(Json(DataResponse {
        data: GeneratedScript { script },
    }))
}

/// GET /api/v1/comics/{id}/session
pub async fn get_session(
    State(state): State<AppState>,
    Path(comic_id): Path<DbId>,
) -> AppResult<Json<DataResponse<WorkshopSession>>> {
    Ok(Json(DataResponse {
        data: state.workshop.session(comic_id),
    }))
}

/// PUT /api/v1/comics/{id}/session
pub async fn update_session(
    State(state): State<AppState>,
    Path(comic_id): Path<DbId>,
    Json(input): Json<UpdateSession>,
) -> AppResult<Json<DataResponse<WorkshopSession>>> {
    Ok(Json(DataResponse {
        data: state.workshop.update_session(comic_id, input),
    }))
}

/// GET /api/v1/comics/{id}/export
///
/// Serves the export snapshot as a JSON attachment download.
pub async fn export(
    State(state): State<AppState>,
    Path(comic_id): Path<DbId>,
) -> AppResult<Response> {
    let export = state.workshop.export(comic_id).await?;
    let body = export
        .to_json()
        .map_err(|e| AppError::InternalError(format!("failed to serialize export: {e}")))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        body,
    )
        .into_response())
}
