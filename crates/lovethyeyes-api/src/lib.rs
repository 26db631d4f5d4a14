//! Shared types for lovethyeyes
//!
//! This crate defines the vocabulary shared by the core engine and the host
//! adapters:
//! - Prompt and break kinds
//! - User actions (the event queue fed back into the core)
//! - Notification requests handed to the dispatcher

mod notification;
mod types;

pub use notification::*;
pub use types::*;

/// Application name reported to the notification server
pub const APP_NAME: &str = "Love Thy Eyes";
