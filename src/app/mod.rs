//! Terminal front end and main event loop.
//!
//! The [`App`] is a thin host around the [`Engine`](crate::engine::Engine):
//! it loads the transcript, maps key presses to engine events, keeps the
//! floor dialog's text buffer and draws with [`crate::ui::render`].

mod event_loop;
mod input;

use std::path::PathBuf;

use crate::settings::{RenderMode, global_settings_path};

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    transcript_path: PathBuf,
    settings_path: PathBuf,
    watch_enabled: bool,
    render_mode: Option<RenderMode>,
    highlight_enabled: Option<bool>,
    save_settings: bool,
}

impl App {
    /// Create a new application for the given transcript.
    pub fn new(transcript_path: PathBuf) -> Self {
        Self {
            transcript_path,
            settings_path: global_settings_path(),
            watch_enabled: false,
            render_mode: None,
            highlight_enabled: None,
            save_settings: false,
        }
    }

    /// Reload the transcript when the file changes.
    pub fn with_watch(mut self, enabled: bool) -> Self {
        self.watch_enabled = enabled;
        self
    }

    pub fn with_settings_path(mut self, path: PathBuf) -> Self {
        self.settings_path = path;
        self
    }

    /// Override the stored render mode for this session.
    pub fn with_render_mode(mut self, mode: Option<RenderMode>) -> Self {
        self.render_mode = mode;
        self
    }

    /// Override the stored highlight setting for this session.
    pub fn with_highlight(mut self, enabled: Option<bool>) -> Self {
        self.highlight_enabled = enabled;
        self
    }

    /// Persist the effective settings right after startup.
    pub fn with_save(mut self, save: bool) -> Self {
        self.save_settings = save;
        self
    }
}
