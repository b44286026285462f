//! HTTP handlers, one module per resource.

pub mod character;
pub mod comic;
pub mod panel;
pub mod workshop;
