//! Comic panel entity model and DTOs.

use comicforge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A panel row from the `comic_panels` table.
///
/// `comic_id` is set at creation and never changes. `panel_number` is
/// intended to be dense and unique within a comic but is not constrained;
/// see `comicforge_core::numbering`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Panel {
    pub id: DbId,
    pub comic_id: DbId,
    pub panel_number: i32,
    pub image_url: Option<String>,
    pub script_text: Option<String>,
    pub dialogue: Option<serde_json::Value>,
    pub ai_prompt: Option<String>,
    pub character_data: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new panel with an explicit number.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePanel {
    pub comic_id: DbId,
    pub panel_number: i32,
    pub script_text: Option<String>,
    pub ai_prompt: Option<String>,
    pub character_data: Option<serde_json::Value>,
}

/// DTO for updating an existing panel. All fields are optional; `comic_id`
/// is deliberately absent (immutable after creation).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePanel {
    pub panel_number: Option<i32>,
    pub image_url: Option<String>,
    pub script_text: Option<String>,
    pub dialogue: Option<serde_json::Value>,
    pub ai_prompt: Option<String>,
    pub character_data: Option<serde_json::Value>,
}
