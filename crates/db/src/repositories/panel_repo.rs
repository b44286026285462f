//! Repository for the `comic_panels` table.

use comicforge_core::types::DbId;
use sqlx::PgPool;

use crate::models::panel::{CreatePanel, Panel, UpdatePanel};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, comic_id, panel_number, image_url, script_text, dialogue, ai_prompt, \
     character_data, created_at, updated_at";

/// Provides CRUD operations for panels plus the generation side-effect
/// write and the server-assigned numbering insert.
pub struct PanelRepo;

impl PanelRepo {
    /// Insert a new panel with an explicit `panel_number`, returning the
    /// created row.
    pub async fn create(pool: &PgPool, input: &CreatePanel) -> Result<Panel, sqlx::Error> {
        let query = format!(
            "INSERT INTO comic_panels (comic_id, panel_number, script_text, ai_prompt, character_data)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Panel>(&query)
            .bind(input.comic_id)
            .bind(input.panel_number)
            .bind(&input.script_text)
            .bind(&input.ai_prompt)
            .bind(&input.character_data)
            .fetch_one(pool)
            .await
    }

    /// Insert a new panel numbered by the database as `MAX(panel_number) + 1`
    /// for the comic. Race-free per statement, unlike client-count numbering.
    pub async fn create_next(
        pool: &PgPool,
        comic_id: DbId,
        script_text: Option<&str>,
    ) -> Result<Panel, sqlx::Error> {
        let query = format!(
            "INSERT INTO comic_panels (comic_id, panel_number, script_text)
             SELECT $1, COALESCE(MAX(panel_number), 0) + 1, $2
             FROM comic_panels WHERE comic_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Panel>(&query)
            .bind(comic_id)
            .bind(script_text)
            .fetch_one(pool)
            .await
    }

    /// Find a panel by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Panel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comic_panels WHERE id = $1");
        sqlx::query_as::<_, Panel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all panels for a comic, ordered by `panel_number` ascending.
    /// Duplicate numbers tie-break on `id` for a stable order.
    pub async fn list_by_comic(pool: &PgPool, comic_id: DbId) -> Result<Vec<Panel>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comic_panels
             WHERE comic_id = $1
             ORDER BY panel_number ASC, id ASC"
        );
        sqlx::query_as::<_, Panel>(&query)
            .bind(comic_id)
            .fetch_all(pool)
            .await
    }

    /// Count panels for a comic. Feeds client-count numbering.
    pub async fn count_by_comic(pool: &PgPool, comic_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comic_panels WHERE comic_id = $1")
            .bind(comic_id)
            .fetch_one(pool)
            .await
    }

    /// Update a panel. Only non-`None` fields in `input` are applied;
    /// `updated_at` is always bumped. `comic_id` is never touched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePanel,
    ) -> Result<Option<Panel>, sqlx::Error> {
        let query = format!(
            "UPDATE comic_panels SET
                panel_number = COALESCE($2, panel_number),
                image_url = COALESCE($3, image_url),
                script_text = COALESCE($4, script_text),
                dialogue = COALESCE($5, dialogue),
                ai_prompt = COALESCE($6, ai_prompt),
                character_data = COALESCE($7, character_data),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Panel>(&query)
            .bind(id)
            .bind(input.panel_number)
            .bind(&input.image_url)
            .bind(&input.script_text)
            .bind(&input.dialogue)
            .bind(&input.ai_prompt)
            .bind(&input.character_data)
            .fetch_optional(pool)
            .await
    }

    /// Record a successful image generation on a panel: the generated URL
    /// plus the prompt that produced it, in one write.
    pub async fn set_generated_image(
        pool: &PgPool,
        id: DbId,
        image_url: &str,
        ai_prompt: &str,
    ) -> Result<Option<Panel>, sqlx::Error> {
        let query = format!(
            "UPDATE comic_panels SET
                image_url = $2,
                ai_prompt = $3,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Panel>(&query)
            .bind(id)
            .bind(image_url)
            .bind(ai_prompt)
            .fetch_optional(pool)
            .await
    }

    /// Delete a panel by ID. Returns `true` if a row was removed.
    ///
    /// Remaining panels are not renumbered.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comic_panels WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
