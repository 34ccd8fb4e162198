//! Search engine state and event handling.
//!
//! This module follows The Elm Architecture (TEA):
//! - [`Engine`]: the complete search/navigation state
//! - [`Event`]: every hook the surrounding UI can fire
//! - [`Engine::handle`]: the single entry point for state transitions
//!
//! The engine owns its [`Settings`](crate::settings::Settings) and reaches
//! the outside world only through three injected collaborators: a
//! [`MessageSource`](crate::transcript::MessageSource), a
//! [`MessageRenderer`](crate::ui::MessageRenderer) and a
//! [`SettingsStore`](crate::settings::SettingsStore).

mod model;
mod update;

pub use model::{ActionLabel, Engine};
pub use update::Event;
