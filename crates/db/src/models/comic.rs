//! Comic entity model and DTOs.

use comicforge_core::error::CoreError;
use comicforge_core::types::{DbId, OwnerId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Publication status of a comic. Maps to the `comic_status` enum type.
///
/// The only transition is `Draft` -> `Published`, performed by the explicit
/// publish operation; nothing moves a comic back to draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "comic_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ComicStatus {
    Draft,
    Published,
}

impl ComicStatus {
    /// Validate the draft -> published transition.
    ///
    /// Publishing an already-published comic is a conflict, not a no-op, so
    /// callers surface it instead of silently re-stamping `published_at`.
    pub fn validate_publish(self) -> Result<(), CoreError> {
        match self {
            ComicStatus::Draft => Ok(()),
            ComicStatus::Published => Err(CoreError::Conflict(
                "comic is already published".to_string(),
            )),
        }
    }
}

/// A comic row from the `comics` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comic {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub genre: Option<String>,
    pub status: ComicStatus,
    pub owner_id: OwnerId,
    /// NOT NULL in the database; defaults to `{}`.
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub published_at: Option<Timestamp>,
}

/// DTO for creating a new comic. Status is always `draft` at creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateComic {
    pub title: String,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub genre: Option<String>,
    pub owner_id: OwnerId,
    pub tags: Option<Vec<String>>,
}

/// DTO for updating an existing comic. All fields are optional.
///
/// Status is deliberately absent: the only status change goes through the
/// publish operation.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateComic {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub genre: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_can_publish() {
        assert!(ComicStatus::Draft.validate_publish().is_ok());
    }

    #[test]
    fn published_cannot_publish_again() {
        let err = ComicStatus::Published.validate_publish().unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(ComicStatus::Draft).unwrap(),
            serde_json::json!("draft")
        );
        assert_eq!(
            serde_json::to_value(ComicStatus::Published).unwrap(),
            serde_json::json!("published")
        );
    }
}
