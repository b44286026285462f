//! Domain types and pure logic for the ComicForge authoring platform.
//!
//! This crate has no I/O: persistence lives in `comicforge-db`, generation
//! endpoint calls in `comicforge-gen`, and the HTTP surface in
//! `comicforge-api`.

pub mod error;
pub mod export;
pub mod numbering;
pub mod session;
pub mod types;
pub mod validation;
