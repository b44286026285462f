//! Transient workshop session state for one open comic.
//!
//! [`WorkshopSession`] holds the UI-facing editing state that is not
//! persisted: the selected panel, the pending character-creation form, the
//! pending generation prompt, and the "writing as" character. The generation
//! in-flight flags also live here; image and script generation are
//! independent and may both be in flight at once.
//!
//! The flags follow a single path: idle -> generating -> (succeeded |
//! failed) -> idle. There is no cancellation. Suppressing a second
//! generation request for the same target while a flag is set is a UI-level
//! guard (disable the control); the service does not reject concurrent
//! calls.

use serde::Serialize;

use crate::types::DbId;

/// Per-comic editing state.
#[derive(Debug, Default, Clone, Serialize)]
pub struct WorkshopSession {
    /// Currently selected panel, if any.
    pub selected_panel_id: Option<DbId>,
    /// Pending character-creation form fields.
    pub pending_character_name: String,
    pub pending_character_description: String,
    /// Pending AI prompt text.
    pub pending_prompt: String,
    /// Character the user is "writing as", if any.
    pub selected_character_id: Option<DbId>,
    /// True while an image generation request is in flight.
    pub generating_image: bool,
    /// True while a script generation request is in flight. Independent of
    /// `generating_image`.
    pub generating_script: bool,
}

impl WorkshopSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_panel(&mut self, panel_id: Option<DbId>) {
        self.selected_panel_id = panel_id;
    }

    pub fn select_character(&mut self, character_id: Option<DbId>) {
        self.selected_character_id = character_id;
    }

    pub fn set_pending_prompt(&mut self, prompt: impl Into<String>) {
        self.pending_prompt = prompt.into();
    }

    pub fn set_pending_character(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) {
        self.pending_character_name = name.into();
        self.pending_character_description = description.into();
    }

    /// Clear the character form after a successful create.
    pub fn clear_character_form(&mut self) {
        self.pending_character_name.clear();
        self.pending_character_description.clear();
    }

    /// Clear the prompt after an image generation request has been issued.
    pub fn clear_prompt(&mut self) {
        self.pending_prompt.clear();
    }

    /// Drop the selection if the given panel was deleted.
    pub fn forget_panel(&mut self, panel_id: DbId) {
        if self.selected_panel_id == Some(panel_id) {
            self.selected_panel_id = None;
        }
    }
}
