//! Comic aggregate loader.
//!
//! Assembles the full read view for one comic: the comic record, its panels
//! ordered by panel number, and its character roster ordered by creation
//! time. The three fetches run concurrently and the loader resolves only
//! once all of them settle. Writes never go through here; they go through
//! the repositories, whose invalidation calls keep these cached views
//! fresh.

use comicforge_core::types::DbId;
use serde::Serialize;
use sqlx::PgPool;

use crate::cache::ScopeCache;
use crate::models::character::Character;
use crate::models::comic::Comic;
use crate::models::panel::Panel;
use crate::repositories::ComicRepo;

/// The composed read view of a comic plus its panels and characters.
#[derive(Debug, Serialize)]
pub struct ComicAggregate {
    pub comic: Comic,
    pub panels: Vec<Panel>,
    pub characters: Vec<Character>,
}

/// Load the aggregate for `comic_id`, reading lists through the cache.
///
/// Returns `Ok(None)` when the comic itself does not exist; panel and
/// character lists for an absent comic are empty, never an error.
pub async fn load_aggregate(
    pool: &PgPool,
    cache: &ScopeCache,
    comic_id: DbId,
) -> Result<Option<ComicAggregate>, sqlx::Error> {
    let (comic, panels, characters) = tokio::try_join!(
        ComicRepo::find_by_id(pool, comic_id),
        cache.panels_for_comic(pool, comic_id),
        cache.characters_for_comic(pool, comic_id),
    )?;

    let Some(comic) = comic else {
        return Ok(None);
    };

    Ok(Some(ComicAggregate {
        comic,
        panels: panels.as_ref().clone(),
        characters: characters.as_ref().clone(),
    }))
}
