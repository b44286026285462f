//! In-process user notifications for ComicForge.

pub mod bus;

pub use bus::{Notification, NotificationBus, NotificationVariant};
