//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. List queries for an absent
//! scope return an empty `Vec`, never an error.

pub mod character_repo;
pub mod comic_repo;
pub mod panel_repo;

pub use character_repo::CharacterRepo;
pub use comic_repo::ComicRepo;
pub use panel_repo::PanelRepo;
