//! Workshop service: the stateful mediator between user actions and the
//! repositories for open comics.
//!
//! Every mutation follows the same contract: nothing is written
//! optimistically, a success invalidates the affected scope's cached list
//! and publishes a confirmation notification, and a failure publishes a
//! destructive notification carrying the underlying message while leaving
//! cache and rows at their last-known-good state. No operation is retried.
//!
//! Image generation persists its result onto the panel; script generation
//! returns the text without persisting anything. The asymmetry is
//! intentional: generated script is handed back for the user to place into
//! a panel manually.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use comicforge_core::error::CoreError;
use comicforge_core::export::{CharacterExport, ComicExport, PanelExport};
use comicforge_core::numbering::{next_panel_number, PanelNumbering};
use comicforge_core::session::WorkshopSession;
use comicforge_core::types::DbId;
use comicforge_core::validation::{require_name, require_prompt};
use comicforge_db::aggregate::{load_aggregate, ComicAggregate};
use comicforge_db::cache::ScopeCache;
use comicforge_db::models::character::{Character, CreateCharacter, UpdateCharacter};
use comicforge_db::models::comic::{Comic, CreateComic, UpdateComic};
use comicforge_db::models::panel::{CreatePanel, Panel, UpdatePanel};
use comicforge_db::repositories::{CharacterRepo, ComicRepo, PanelRepo};
use comicforge_db::DbPool;
use comicforge_events::{Notification, NotificationBus};
use comicforge_gen::{CharacterContext, GenClient};
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Placeholder script seeded into every newly added panel.
const NEW_PANEL_SCRIPT: &str = "New panel";

/// Partial update to a comic's workshop session. `None` fields are left
/// untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSession {
    pub selected_panel_id: Option<DbId>,
    pub selected_character_id: Option<DbId>,
    pub pending_prompt: Option<String>,
    pub pending_character_name: Option<String>,
    pub pending_character_description: Option<String>,
}

/// Orchestrates workshop actions for open comics.
///
/// Holds the transient per-comic [`WorkshopSession`]s, including the
/// independent image/script generation in-flight flags. The flags are
/// exposed so the UI can disable the triggering controls; the service
/// itself does not reject concurrent generation calls.
pub struct WorkshopService {
    pool: DbPool,
    cache: Arc<ScopeCache>,
    gen: Arc<GenClient>,
    bus: Arc<NotificationBus>,
    numbering: PanelNumbering,
    sessions: RwLock<HashMap<DbId, WorkshopSession>>,
}

impl WorkshopService {
    pub fn new(
        pool: DbPool,
        cache: Arc<ScopeCache>,
        gen: Arc<GenClient>,
        bus: Arc<NotificationBus>,
        numbering: PanelNumbering,
    ) -> Self {
        Self {
            pool,
            cache,
            gen,
            bus,
            numbering,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    // -- Notification helpers ------------------------------------------------

    fn done(&self, title: &str, description: &str) {
        self.bus.publish(Notification::success(title, description));
    }

    /// Publish a failure notification and hand the error back to the caller.
    fn fail(&self, title: &str, err: impl Into<AppError>) -> AppError {
        let err = err.into();
        self.bus.publish(Notification::error(title, err.to_string()));
        err
    }

    // -- Session state -------------------------------------------------------

    fn with_session<R>(&self, comic_id: DbId, f: impl FnOnce(&mut WorkshopSession) -> R) -> R {
        let mut guard = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        f(guard.entry(comic_id).or_default())
    }

    /// Snapshot of the session state for a comic.
    pub fn session(&self, comic_id: DbId) -> WorkshopSession {
        let guard = self.sessions.read().unwrap_or_else(|e| e.into_inner());
        guard.get(&comic_id).cloned().unwrap_or_default()
    }

    /// Apply a partial session update and return the new state.
    pub fn update_session(&self, comic_id: DbId, input: UpdateSession) -> WorkshopSession {
        self.with_session(comic_id, |session| {
            if let Some(panel_id) = input.selected_panel_id {
                session.select_panel(Some(panel_id));
            }
            if let Some(character_id) = input.selected_character_id {
                session.select_character(Some(character_id));
            }
            if let Some(prompt) = input.pending_prompt {
                session.set_pending_prompt(prompt);
            }
            if let Some(name) = input.pending_character_name {
                session.pending_character_name = name;
            }
            if let Some(description) = input.pending_character_description {
                session.pending_character_description = description;
            }
            session.clone()
        })
    }

    // -- Comics --------------------------------------------------------------

    pub async fn create_comic(&self, input: CreateComic) -> AppResult<Comic> {
        let comic = ComicRepo::create(&self.pool, &input)
            .await
            .map_err(|e| self.fail("Creation failed", e))?;
        self.cache.invalidate_comics(comic.owner_id);
        self.done("Comic created", "Your new comic has been created successfully.");
        Ok(comic)
    }

    pub async fn update_comic(&self, id: DbId, input: UpdateComic) -> AppResult<Comic> {
        let comic = ComicRepo::update(&self.pool, id, &input)
            .await
            .map_err(|e| self.fail("Update failed", e))?
            .ok_or_else(|| {
                self.fail(
                    "Update failed",
                    CoreError::NotFound { entity: "Comic", id },
                )
            })?;
        self.cache.invalidate_comics(comic.owner_id);
        self.done("Comic updated", "Your comic has been updated successfully.");
        Ok(comic)
    }

    /// One-way draft -> published transition.
    pub async fn publish_comic(&self, id: DbId) -> AppResult<Comic> {
        let published = ComicRepo::publish(&self.pool, id)
            .await
            .map_err(|e| self.fail("Publish failed", e))?;

        let comic = match published {
            Some(comic) => comic,
            // Distinguish "missing" from "already published".
            None => match ComicRepo::find_by_id(&self.pool, id)
                .await
                .map_err(|e| self.fail("Publish failed", e))?
            {
                Some(existing) => {
                    // The SQL guard only skips rows that are not drafts.
                    let err = existing.status.validate_publish().err().unwrap_or_else(|| {
                        CoreError::Internal("publish transition did not apply".to_string())
                    });
                    return Err(self.fail("Publish failed", err));
                }
                None => {
                    return Err(self.fail(
                        "Publish failed",
                        CoreError::NotFound { entity: "Comic", id },
                    ))
                }
            },
        };

        self.cache.invalidate_comics(comic.owner_id);
        self.done("Comic published", "Your comic is now published.");
        Ok(comic)
    }

    pub async fn delete_comic(&self, id: DbId) -> AppResult<()> {
        let comic = ComicRepo::find_by_id(&self.pool, id)
            .await
            .map_err(|e| self.fail("Delete failed", e))?
            .ok_or_else(|| {
                self.fail(
                    "Delete failed",
                    CoreError::NotFound { entity: "Comic", id },
                )
            })?;

        ComicRepo::delete(&self.pool, id)
            .await
            .map_err(|e| self.fail("Delete failed", e))?;

        // The store cascades panels and characters; drop their scopes too.
        self.cache.invalidate_comics(comic.owner_id);
        self.cache.invalidate_panels(id);
        self.cache.invalidate_characters(id);
        let mut guard = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        guard.remove(&id);

        self.done("Comic deleted", "Your comic has been deleted successfully.");
        Ok(())
    }

    // -- Panels --------------------------------------------------------------

    /// Add a panel numbered by the configured policy, seeded with the
    /// placeholder script. Always allowed; the first panel gets number 1.
    pub async fn add_panel(&self, comic_id: DbId) -> AppResult<Panel> {
        let created = match self.numbering {
            PanelNumbering::ClientCount => {
                // Number from the observed list length. Two concurrent
                // calls can both observe the same count and insert
                // duplicate numbers; the store accepts them.
                let observed = self
                    .cache
                    .panels_for_comic(&self.pool, comic_id)
                    .await
                    .map_err(|e| self.fail("Failed to create panel", e))?
                    .len() as i64;
                let input = CreatePanel {
                    comic_id,
                    panel_number: next_panel_number(observed),
                    script_text: Some(NEW_PANEL_SCRIPT.to_string()),
                    ai_prompt: None,
                    character_data: None,
                };
                PanelRepo::create(&self.pool, &input).await
            }
            PanelNumbering::ServerSequence => {
                PanelRepo::create_next(&self.pool, comic_id, Some(NEW_PANEL_SCRIPT)).await
            }
        }
        .map_err(|e| self.fail("Failed to create panel", e))?;

        self.cache.invalidate_panels(comic_id);
        self.done("Panel created", "Your comic panel has been created successfully.");
        Ok(created)
    }

    /// Create a panel with an explicit number.
    pub async fn create_panel(&self, input: CreatePanel) -> AppResult<Panel> {
        let panel = PanelRepo::create(&self.pool, &input)
            .await
            .map_err(|e| self.fail("Failed to create panel", e))?;
        self.cache.invalidate_panels(panel.comic_id);
        self.done("Panel created", "Your comic panel has been created successfully.");
        Ok(panel)
    }

    pub async fn update_panel(
        &self,
        comic_id: DbId,
        panel_id: DbId,
        input: UpdatePanel,
    ) -> AppResult<Panel> {
        let panel = PanelRepo::update(&self.pool, panel_id, &input)
            .await
            .map_err(|e| self.fail("Failed to update panel", e))?
            .ok_or_else(|| {
                self.fail(
                    "Failed to update panel",
                    CoreError::NotFound {
                        entity: "Panel",
                        id: panel_id,
                    },
                )
            })?;
        self.cache.invalidate_panels(comic_id);
        self.done("Panel updated", "Your comic panel has been updated successfully.");
        Ok(panel)
    }

    pub async fn delete_panel(&self, comic_id: DbId, panel_id: DbId) -> AppResult<()> {
        let deleted = PanelRepo::delete(&self.pool, panel_id)
            .await
            .map_err(|e| self.fail("Failed to delete panel", e))?;
        if !deleted {
            return Err(self.fail(
                "Failed to delete panel",
                CoreError::NotFound {
                    entity: "Panel",
                    id: panel_id,
                },
            ));
        }
        self.cache.invalidate_panels(comic_id);
        self.with_session(comic_id, |session| session.forget_panel(panel_id));
        self.done("Panel deleted", "The comic panel has been deleted successfully.");
        Ok(())
    }

    // -- Generation ----------------------------------------------------------

    /// Generate an image for a panel and persist the result.
    ///
    /// An empty or whitespace prompt is rejected before any network call
    /// and mutates nothing. On success the panel's `image_url` and
    /// `ai_prompt` are written and the pending prompt is cleared; on
    /// failure the panel's existing image is left untouched.
    pub async fn generate_image(
        &self,
        comic_id: DbId,
        panel_id: DbId,
        prompt: &str,
    ) -> AppResult<Panel> {
        let prompt = match require_prompt(prompt) {
            Ok(p) => p.to_string(),
            Err(err) => {
                self.bus.publish(Notification::error(
                    "Prompt required",
                    "Please enter a prompt to generate an image.",
                ));
                return Err(err.into());
            }
        };

        self.with_session(comic_id, |session| session.generating_image = true);
        let result = self.run_image_generation(comic_id, panel_id, &prompt).await;
        self.with_session(comic_id, |session| {
            session.generating_image = false;
            if result.is_ok() {
                session.clear_prompt();
            }
        });
        result
    }

    async fn run_image_generation(
        &self,
        comic_id: DbId,
        panel_id: DbId,
        prompt: &str,
    ) -> AppResult<Panel> {
        let image_url = self
            .gen
            .generate_image(prompt)
            .await
            .map_err(|e| self.fail("Failed to generate image", e))?;

        let panel = PanelRepo::set_generated_image(&self.pool, panel_id, &image_url, prompt)
            .await
            .map_err(|e| self.fail("Failed to generate image", e))?
            .ok_or_else(|| {
                self.fail(
                    "Failed to generate image",
                    CoreError::NotFound {
                        entity: "Panel",
                        id: panel_id,
                    },
                )
            })?;

        self.cache.invalidate_panels(comic_id);
        self.done(
            "Image generated",
            "Your comic panel image has been generated successfully.",
        );
        Ok(panel)
    }

    /// Generate script text with the comic's character roster as context.
    ///
    /// The text is returned to the caller and never persisted; there is no
    /// success notification either, matching the observed behavior.
    pub async fn generate_script(&self, comic_id: DbId, prompt: &str) -> AppResult<String> {
        let prompt = match require_prompt(prompt) {
            Ok(p) => p.to_string(),
            Err(err) => {
                self.bus.publish(Notification::error(
                    "Prompt required",
                    "Please enter a prompt to generate a script.",
                ));
                return Err(err.into());
            }
        };

        let roster = self
            .cache
            .characters_for_comic(&self.pool, comic_id)
            .await
            .map_err(|e| self.fail("Failed to generate script", e))?;
        let characters: Vec<CharacterContext> = roster
            .iter()
            .map(|c| CharacterContext {
                name: c.name.clone(),
                description: c.description.clone(),
            })
            .collect();

        self.with_session(comic_id, |session| session.generating_script = true);
        let result = self
            .gen
            .generate_script(&prompt, &characters)
            .await
            .map_err(|e| self.fail("Failed to generate script", e));
        self.with_session(comic_id, |session| session.generating_script = false);

        Ok(result?)
    }

    // -- Characters ----------------------------------------------------------

    /// Create a character. An empty or whitespace name is rejected before
    /// any store call; success clears the pending character form.
    pub async fn create_character(&self, input: CreateCharacter) -> AppResult<Character> {
        let name = match require_name(&input.name) {
            Ok(n) => n.to_string(),
            Err(err) => {
                self.bus.publish(Notification::error(
                    "Character name required",
                    "Please enter a character name.",
                ));
                return Err(err.into());
            }
        };

        let input = CreateCharacter {
            name,
            ..input
        };
        let character = CharacterRepo::create(&self.pool, &input)
            .await
            .map_err(|e| self.fail("Failed to create character", e))?;

        self.cache.invalidate_characters(character.comic_id);
        self.with_session(character.comic_id, |session| session.clear_character_form());
        self.done("Character created", "Your character has been created successfully.");
        Ok(character)
    }

    pub async fn update_character(
        &self,
        comic_id: DbId,
        character_id: DbId,
        input: UpdateCharacter,
    ) -> AppResult<Character> {
        let character = CharacterRepo::update(&self.pool, character_id, &input)
            .await
            .map_err(|e| self.fail("Failed to update character", e))?
            .ok_or_else(|| {
                self.fail(
                    "Failed to update character",
                    CoreError::NotFound {
                        entity: "Character",
                        id: character_id,
                    },
                )
            })?;
        self.cache.invalidate_characters(comic_id);
        self.done("Character updated", "Your character has been updated successfully.");
        Ok(character)
    }

    pub async fn delete_character(&self, comic_id: DbId, character_id: DbId) -> AppResult<()> {
        let deleted = CharacterRepo::delete(&self.pool, character_id)
            .await
            .map_err(|e| self.fail("Failed to delete character", e))?;
        if !deleted {
            return Err(self.fail(
                "Failed to delete character",
                CoreError::NotFound {
                    entity: "Character",
                    id: character_id,
                },
            ));
        }
        self.cache.invalidate_characters(comic_id);
        self.done("Character deleted", "The character has been deleted successfully.");
        Ok(())
    }

    // -- Reads ---------------------------------------------------------------

    /// Full aggregate view for one open comic.
    pub async fn workspace(&self, comic_id: DbId) -> AppResult<ComicAggregate> {
        load_aggregate(&self.pool, &self.cache, comic_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::NotFound {
                    entity: "Comic",
                    id: comic_id,
                })
            })
    }

    /// Assemble the export snapshot: ordered panels plus the character
    /// roster. Pure read/transform over the aggregate.
    pub async fn export(&self, comic_id: DbId) -> AppResult<ComicExport> {
        let aggregate = self.workspace(comic_id).await?;

        let panels = aggregate
            .panels
            .iter()
            .map(|panel| PanelExport {
                number: panel.panel_number,
                script: panel.script_text.clone(),
                image_url: panel.image_url.clone(),
            })
            .collect();
        let characters = aggregate
            .characters
            .iter()
            .map(|character| CharacterExport {
                name: character.name.clone(),
                description: character.description.clone(),
            })
            .collect();

        self.done("Comic exported", "Your comic has been exported successfully.");
        Ok(ComicExport::new(panels, characters))
    }
}
