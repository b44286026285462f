//! HTTP client for the external AI generation endpoints.

pub mod client;

pub use client::{CharacterContext, GenClient, GenError};
