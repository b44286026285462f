//! Per-scope list cache.
//!
//! Cached lists are keyed by `(entity type, scope key)`: comics by owner,
//! panels and characters by comic. A successful mutation invalidates its
//! scope's entry, forcing the next read to re-fetch; nothing is inserted
//! optimistically before server confirmation.
//!
//! Concurrency contract: last write wins. Two in-flight loads for the same
//! scope both fetch and the later `store` replaces the earlier one; a stale
//! response stored after a later invalidation can briefly resurrect old
//! rows until the next mutation. This is the accepted weakness of the
//! design, not a correctness guarantee.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use comicforge_core::types::{DbId, OwnerId};
use sqlx::PgPool;

use crate::models::character::Character;
use crate::models::comic::Comic;
use crate::models::panel::Panel;
use crate::repositories::{CharacterRepo, ComicRepo, PanelRepo};

/// A cached list snapshot with the version it was stored under.
struct CachedList<V> {
    version: u64,
    rows: Arc<Vec<V>>,
}

/// Versioned list cache for one entity type.
///
/// Versions increase monotonically across stores so a reader can tell two
/// snapshots of the same scope apart; invalidation simply drops the entry.
pub struct ListCache<K, V> {
    inner: RwLock<HashMap<K, CachedList<V>>>,
    next_version: AtomicU64,
}

impl<K: Eq + Hash, V> ListCache<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            next_version: AtomicU64::new(1),
        }
    }

    /// Cached rows for a scope, if present.
    pub fn get(&self, key: &K) -> Option<Arc<Vec<V>>> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        guard.get(key).map(|entry| Arc::clone(&entry.rows))
    }

    /// Version of the cached snapshot for a scope, if present.
    pub fn version(&self, key: &K) -> Option<u64> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        guard.get(key).map(|entry| entry.version)
    }

    /// Store a freshly fetched list for a scope, replacing any prior entry.
    pub fn store(&self, key: K, rows: Vec<V>) -> Arc<Vec<V>> {
        let rows = Arc::new(rows);
        let version = self.next_version.fetch_add(1, Ordering::Relaxed);
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        guard.insert(
            key,
            CachedList {
                version,
                rows: Arc::clone(&rows),
            },
        );
        rows
    }

    /// Drop the cached entry for a scope. No-op if nothing is cached.
    pub fn invalidate(&self, key: &K) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        guard.remove(key);
    }
}

impl<K: Eq + Hash, V> Default for ListCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// The shared cache over all three entity collections, with read-through
/// helpers that consult the cache before hitting the repository.
pub struct ScopeCache {
    comics: ListCache<OwnerId, Comic>,
    panels: ListCache<DbId, Panel>,
    characters: ListCache<DbId, Character>,
}

impl ScopeCache {
    pub fn new() -> Self {
        Self {
            comics: ListCache::new(),
            panels: ListCache::new(),
            characters: ListCache::new(),
        }
    }

    /// Comics for an owner, most recently updated first.
    pub async fn comics_for_owner(
        &self,
        pool: &PgPool,
        owner_id: OwnerId,
    ) -> Result<Arc<Vec<Comic>>, sqlx::Error> {
        if let Some(rows) = self.comics.get(&owner_id) {
            return Ok(rows);
        }
        let rows = ComicRepo::list_by_owner(pool, owner_id).await?;
        Ok(self.comics.store(owner_id, rows))
    }

    /// Panels for a comic, ordered by panel number.
    pub async fn panels_for_comic(
        &self,
        pool: &PgPool,
        comic_id: DbId,
    ) -> Result<Arc<Vec<Panel>>, sqlx::Error> {
        if let Some(rows) = self.panels.get(&comic_id) {
            return Ok(rows);
        }
        let rows = PanelRepo::list_by_comic(pool, comic_id).await?;
        Ok(self.panels.store(comic_id, rows))
    }

    /// Characters for a comic, ordered by creation time.
    pub async fn characters_for_comic(
        &self,
        pool: &PgPool,
        comic_id: DbId,
    ) -> Result<Arc<Vec<Character>>, sqlx::Error> {
        if let Some(rows) = self.characters.get(&comic_id) {
            return Ok(rows);
        }
        let rows = CharacterRepo::list_by_comic(pool, comic_id).await?;
        Ok(self.characters.store(comic_id, rows))
    }

    pub fn invalidate_comics(&self, owner_id: OwnerId) {
        self.comics.invalidate(&owner_id);
    }

    pub fn invalidate_panels(&self, comic_id: DbId) {
        self.panels.invalidate(&comic_id);
    }

    pub fn invalidate_characters(&self, comic_id: DbId) {
        self.characters.invalidate(&comic_id);
    }
}

impl Default for ScopeCache {
    fn default() -> Self {
        Self::new()
    }
}
