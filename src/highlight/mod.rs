//! Keyword highlighting inside rendered messages.
//!
//! The [`Highlighter`] remembers every message it has marked and the
//! keyword that produced the marks. Applying a highlight always clears the
//! previous one first, so at most one keyword is ever marked and repeated
//! calls never nest markers.

use std::collections::BTreeSet;

use crate::search::match_ranges;
use crate::transcript::ChatMessage;
use crate::ui::MessageRenderer;

/// Messages currently bearing a marker, and the keyword behind them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightState {
    keyword: Option<String>,
    indices: BTreeSet<usize>,
}

impl HighlightState {
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    pub const fn indices(&self) -> &BTreeSet<usize> {
        &self.indices
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Highlighter {
    enabled: bool,
    state: HighlightState,
}

impl Highlighter {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            state: HighlightState::default(),
        }
    }

    pub const fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub const fn state(&self) -> &HighlightState {
        &self.state
    }

    /// Mark every occurrence of `keyword` in `message`.
    ///
    /// Does nothing while highlighting is disabled. Returns whether a
    /// marker was placed.
    pub fn apply<R: MessageRenderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        message: &ChatMessage,
        keyword: &str,
    ) -> bool {
        if !self.enabled {
            return false;
        }
        self.clear(renderer);

        let ranges = match_ranges(&message.text, keyword);
        if ranges.is_empty() {
            return false;
        }
        tracing::debug!(index = message.index, keyword, marks = ranges.len(), "highlight applied");
        renderer.set_highlighted(message.index, &ranges);
        self.state.keyword = Some(keyword.to_string());
        self.state.indices.insert(message.index);
        true
    }

    /// Restore every marked message to plain text.
    ///
    /// Runs even while highlighting is disabled so markers placed before the
    /// setting changed are still removed.
    pub fn clear<R: MessageRenderer + ?Sized>(&mut self, renderer: &mut R) {
        if self.state.indices.is_empty() {
            self.state.keyword = None;
            return;
        }
        for index in std::mem::take(&mut self.state.indices) {
            renderer.set_highlighted(index, &[]);
        }
        tracing::debug!(keyword = ?self.state.keyword, "highlight cleared");
        self.state.keyword = None;
    }
}
