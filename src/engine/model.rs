use std::time::Instant;

use crate::feedback::{Feedback, FeedbackLevel};
use crate::floor::FloorDialog;
use crate::highlight::{HighlightState, Highlighter};
use crate::settings::{RenderMode, Settings, SettingsStore, load_settings};
use crate::transcript::MessageSource;
use crate::ui::MessageRenderer;

/// What the single action button does next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionLabel {
    /// Reset the input and remove highlights.
    Clear,
    /// Run the search for the current input.
    Search,
}

impl ActionLabel {
    pub const fn for_mode(mode: RenderMode) -> Self {
        match mode {
            RenderMode::Realtime => Self::Clear,
            RenderMode::Confirm => Self::Search,
        }
    }

    pub const fn text(self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Search => "Search",
        }
    }
}

/// The search and navigation state.
///
/// All state lives here, owned by whoever drives the event loop.
pub struct Engine<S, R, P> {
    pub(super) source: S,
    pub(super) renderer: R,
    pub(super) store: P,
    pub(super) settings: Settings,
    pub(super) highlighter: Highlighter,
    pub(super) feedback: Feedback,
    pub(super) floor_dialog: FloorDialog,
    /// Current contents of the keyword input
    pub(super) input: String,
    pub(super) settings_panel_open: bool,
}

impl<S, R, P> std::fmt::Debug for Engine<S, R, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("settings", &self.settings)
            .field("input", &self.input)
            .field("highlight", self.highlighter.state())
            .field("floor_dialog", &self.floor_dialog)
            .finish_non_exhaustive()
    }
}

impl<S, R, P> Engine<S, R, P>
where
    S: MessageSource,
    R: MessageRenderer,
    P: SettingsStore,
{
    /// Create an engine, loading settings from `store` (defaults are
    /// installed when nothing usable is stored).
    pub fn start(source: S, renderer: R, mut store: P) -> Self {
        let settings = load_settings(&mut store);
        Self::with_settings(source, renderer, store, settings)
    }

    /// Create an engine with settings the caller already holds.
    pub fn with_settings(source: S, renderer: R, store: P, settings: Settings) -> Self {
        Self {
            source,
            renderer,
            store,
            settings,
            highlighter: Highlighter::new(settings.highlight_enabled),
            feedback: Feedback::default(),
            floor_dialog: FloorDialog::default(),
            input: String::new(),
            settings_panel_open: false,
        }
    }

    /// Hand the collaborators and the current settings back to the caller.
    pub fn into_parts(self) -> (S, R, P, Settings) {
        (self.source, self.renderer, self.store, self.settings)
    }
}

impl<S, R, P> Engine<S, R, P> {
    pub const fn settings(&self) -> Settings {
        self.settings
    }

    pub const fn render_mode(&self) -> RenderMode {
        self.settings.render_mode
    }

    /// Label of the action button; always derived from the render mode.
    pub const fn button_label(&self) -> ActionLabel {
        ActionLabel::for_mode(self.settings.render_mode)
    }

    /// Text the feedback line should show, if any.
    pub fn error_text(&self) -> Option<&str> {
        self.feedback.text()
    }

    pub const fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    /// Show host-originated text (reload failures, watch status) on the
    /// feedback line.
    pub fn notify(&mut self, level: FeedbackLevel, text: impl Into<String>, now: Instant) {
        self.feedback.show(level, text, now);
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub const fn floor_dialog(&self) -> &FloorDialog {
        &self.floor_dialog
    }

    pub const fn settings_panel_open(&self) -> bool {
        self.settings_panel_open
    }

    pub const fn highlighted(&self) -> &HighlightState {
        self.highlighter.state()
    }

    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access for hosts that update the transcript in place.
    pub const fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    pub const fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub const fn store(&self) -> &P {
        &self.store
    }

    pub const fn store_mut(&mut self) -> &mut P {
        &mut self.store
    }
}
