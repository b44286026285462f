//! Repository for the `comics` table.

use comicforge_core::types::{DbId, OwnerId};
use sqlx::PgPool;

use crate::models::comic::{Comic, CreateComic, UpdateComic};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, cover_image, genre, status, owner_id, tags, \
     created_at, updated_at, published_at";

/// Provides CRUD operations for comics plus the publish transition.
pub struct ComicRepo;

impl ComicRepo {
    /// Insert a new comic, returning the created row.
    ///
    /// Status is always `draft`; `tags` defaults to an empty array.
    pub async fn create(pool: &PgPool, input: &CreateComic) -> Result<Comic, sqlx::Error> {
        let query = format!(
            "INSERT INTO comics (title, description, cover_image, genre, owner_id, tags)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, '{{}}'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comic>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.cover_image)
            .bind(&input.genre)
            .bind(input.owner_id)
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    /// Find a comic by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comic>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comics WHERE id = $1");
        sqlx::query_as::<_, Comic>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all comics for an owner, most recently updated first.
    pub async fn list_by_owner(pool: &PgPool, owner_id: OwnerId) -> Result<Vec<Comic>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comics
             WHERE owner_id = $1
             ORDER BY updated_at DESC"
        );
        sqlx::query_as::<_, Comic>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Update a comic. Only non-`None` fields in `input` are applied;
    /// `updated_at` is always bumped.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateComic,
    ) -> Result<Option<Comic>, sqlx::Error> {
        let query = format!(
            "UPDATE comics SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                cover_image = COALESCE($4, cover_image),
                genre = COALESCE($5, genre),
                tags = COALESCE($6, tags),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comic>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.cover_image)
            .bind(&input.genre)
            .bind(&input.tags)
            .fetch_optional(pool)
            .await
    }

    /// Transition a draft comic to published, stamping `published_at`.
    ///
    /// Returns `None` if the row does not exist *or* is already published;
    /// callers distinguish the two with [`find_by_id`](Self::find_by_id).
    pub async fn publish(pool: &PgPool, id: DbId) -> Result<Option<Comic>, sqlx::Error> {
        let query = format!(
            "UPDATE comics SET
                status = 'published',
                published_at = NOW(),
                updated_at = NOW()
             WHERE id = $1 AND status = 'draft'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comic>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a comic by ID. Returns `true` if a row was removed.
    ///
    /// Panels and characters cascade at the store level (FK `ON DELETE
    /// CASCADE`).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comics WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
