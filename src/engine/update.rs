use std::time::Instant;

use crate::engine::Engine;
use crate::error::SearchError;
use crate::navigation::{self, NavTarget};
use crate::search;
use crate::settings::{RenderMode, SettingsStore};
use crate::transcript::MessageSource;
use crate::ui::MessageRenderer;

/// Every hook the surrounding UI can fire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // Keyword search
    /// The keyword input now holds this text
    InputChanged(String),
    /// The action button was clicked
    ActionClicked,
    /// Enter was pressed in the keyword input
    EnterPressed,

    // Navigation
    /// Jump to the earliest message
    ScrollFirst,
    /// Jump to the latest message
    ScrollLast,
    /// Open the jump-to-floor dialog
    OpenFloorDialog,
    /// The floor dialog was submitted with this text
    FloorSubmitted(String),
    /// The floor dialog was dismissed
    CancelFloorDialog,

    // Settings
    ToggleRenderMode,
    SetRenderMode(RenderMode),
    ToggleHighlight,
    SetHighlightEnabled(bool),
    OpenSettingsPanel,
    CloseSettingsPanel,
    /// Persist the current settings
    SaveSettings,

    /// The host changed the message list (reload, edit, delete)
    SourceChanged,

    /// Time passed; lets the feedback line expire
    Tick,
}

impl<S, R, P> Engine<S, R, P>
where
    S: MessageSource,
    R: MessageRenderer,
    P: SettingsStore,
{
    /// Apply one event.
    ///
    /// Returns false only when nothing visible changed, so hosts can skip
    /// a redraw.
    pub fn handle(&mut self, event: Event, now: Instant) -> bool {
        match event {
            Event::InputChanged(text) => {
                self.input = text;
                if self.settings.render_mode == RenderMode::Realtime {
                    self.run_search(now);
                }
            }
            Event::ActionClicked => self.action(now),
            Event::EnterPressed => {
                if self.settings.render_mode == RenderMode::Confirm {
                    self.action(now);
                }
            }

            Event::ScrollFirst => {
                self.feedback.clear();
                self.jump(NavTarget::First, now);
            }
            Event::ScrollLast => {
                self.feedback.clear();
                self.jump(NavTarget::Last, now);
            }
            Event::OpenFloorDialog => {
                self.feedback.clear();
                self.floor_dialog.open(self.source.message_count());
            }
            Event::FloorSubmitted(input) => {
                let count = self.source.message_count();
                match self.floor_dialog.submit(&input, count) {
                    Ok(Some(floor)) => self.jump(NavTarget::Index(floor), now),
                    Ok(None) => {}
                    Err(err) => tracing::debug!(%err, input = %input, "floor rejected"),
                }
            }
            Event::CancelFloorDialog => self.floor_dialog.cancel(),

            Event::ToggleRenderMode => {
                self.set_render_mode(self.settings.render_mode.toggled());
            }
            Event::SetRenderMode(mode) => self.set_render_mode(mode),
            Event::ToggleHighlight => {
                self.set_highlight_enabled(!self.settings.highlight_enabled);
            }
            Event::SetHighlightEnabled(enabled) => self.set_highlight_enabled(enabled),
            Event::OpenSettingsPanel => self.settings_panel_open = true,
            Event::CloseSettingsPanel => self.settings_panel_open = false,
            Event::SaveSettings => {
                // In-memory state is already current; only the write remains.
                self.settings_panel_open = false;
                self.feedback.clear();
                self.store.persist(&self.settings);
                tracing::info!(settings = ?self.settings, "settings save requested");
            }

            Event::SourceChanged => self.refresh_highlight(),

            Event::Tick => return self.feedback.expire(now),
        }
        true
    }

    /// The overloaded action button: clear in realtime mode, search in
    /// confirm mode, and clear again when confirming an empty keyword.
    fn action(&mut self, now: Instant) {
        let empty = self.input.trim().is_empty();
        match self.settings.render_mode {
            RenderMode::Confirm if !empty => self.run_search(now),
            RenderMode::Confirm | RenderMode::Realtime => self.clear_search(),
        }
    }

    fn clear_search(&mut self) {
        self.input.clear();
        self.highlighter.clear(&mut self.renderer);
    }

    fn run_search(&mut self, now: Instant) {
        self.highlighter.clear(&mut self.renderer);
        let keyword = self.input.trim().to_string();
        if keyword.is_empty() {
            return;
        }

        let messages = self.source.messages();
        if messages.is_empty() {
            self.report(SearchError::EmptyMessageList, now);
            return;
        }
        let Some(hit) = search::find_first(&messages, &keyword) else {
            self.report(SearchError::NoMatch { keyword }, now);
            return;
        };
        tracing::debug!(keyword = %keyword, index = hit.index, matched = %hit.matched_text, "search hit");

        if let Err(err) =
            navigation::scroll_to(&mut self.renderer, messages.len(), NavTarget::Index(hit.index))
        {
            self.report(err, now);
            return;
        }
        self.feedback.clear();
        if let Some(message) = messages.iter().find(|message| message.index == hit.index) {
            self.highlighter.apply(&mut self.renderer, message, &keyword);
        }
    }

    /// Recompute marks against the current text. The view is not moved;
    /// the mark is dropped when its message no longer holds the keyword.
    fn refresh_highlight(&mut self) {
        let state = self.highlighter.state().clone();
        self.highlighter.clear(&mut self.renderer);
        let (Some(keyword), Some(index)) = (state.keyword(), state.indices().first()) else {
            return;
        };
        let messages = self.source.messages();
        if let Some(message) = messages.iter().find(|message| message.index == *index) {
            self.highlighter.apply(&mut self.renderer, message, keyword);
        }
    }

    fn jump(&mut self, target: NavTarget, now: Instant) {
        let count = self.source.message_count();
        if let Err(err) = navigation::scroll_to(&mut self.renderer, count, target) {
            self.report(err, now);
        }
    }

    fn set_render_mode(&mut self, mode: RenderMode) {
        if self.settings.render_mode != mode {
            tracing::debug!(?mode, "render mode changed");
        }
        self.settings.render_mode = mode;
    }

    fn set_highlight_enabled(&mut self, enabled: bool) {
        self.settings.highlight_enabled = enabled;
        self.highlighter.set_enabled(enabled);
        if !enabled {
            self.highlighter.clear(&mut self.renderer);
        }
    }

    fn report(&mut self, err: SearchError, now: Instant) {
        tracing::debug!(%err, "reported to user");
        self.feedback.error(err.to_string(), now);
    }
}
