// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. settings::SettingsStore)
    clippy::module_name_repetitions
)]

//! # msgseek
//!
//! Keyword search, highlighting and floor navigation for chat transcripts.
//!
//! msgseek finds the earliest message containing a keyword
//! (case-insensitively), scrolls it into view and marks every occurrence.
//! Searches run as you type or only on request, depending on the render
//! mode, and both preferences persist across sessions.
//!
//! ## Architecture
//!
//! The [`engine`] follows The Elm Architecture (TEA):
//! - **Model**: [`engine::Engine`] holds all state
//! - **Event**: [`engine::Event`] describes what happened
//! - **Update**: [`engine::Engine::handle`] applies it
//! - **View**: [`ui::render`] draws the terminal front end
//!
//! The engine is generic over three collaborators, so any host can drive it:
//! a [`transcript::MessageSource`], a [`ui::MessageRenderer`] and a
//! [`settings::SettingsStore`].
//!
//! ## Modules
//!
//! - [`app`]: Terminal event loop
//! - [`engine`]: Search and navigation state machine
//! - [`search`]: Case-insensitive keyword matching
//! - [`highlight`]: Keyword marking inside a rendered message
//! - [`navigation`]: First/last/index scrolling
//! - [`floor`]: Floor-number dialog
//! - [`settings`]: Persisted preferences
//! - [`feedback`]: Auto-dismissing status text
//! - [`transcript`]: Message loading
//! - [`ui`]: Renderer seam and ratatui views
//! - [`watcher`]: Transcript file watching

pub mod app;
pub mod engine;
pub mod error;
pub mod feedback;
pub mod floor;
pub mod highlight;
pub mod navigation;
pub mod search;
pub mod settings;
pub mod transcript;
pub mod ui;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::engine::{ActionLabel, Engine, Event};
    pub use crate::error::SearchError;
    pub use crate::settings::{RenderMode, Settings, SettingsStore};
    pub use crate::transcript::{ChatMessage, MessageSource, Transcript};
    pub use crate::ui::MessageRenderer;
}
