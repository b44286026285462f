//! Character entity model and DTOs.

use comicforge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A character row from the `characters` table.
///
/// Panels reference characters only informally through their
/// `character_data` blob; there is no foreign key from panels to
/// characters.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    pub comic_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub character_prompt: Option<String>,
    pub appearance_data: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new character.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCharacter {
    pub comic_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub character_prompt: Option<String>,
    pub appearance_data: Option<serde_json::Value>,
}

/// DTO for updating an existing character. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCharacter {
    pub name: Option<String>,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub character_prompt: Option<String>,
    pub appearance_data: Option<serde_json::Value>,
}
