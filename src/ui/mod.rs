//! Rendering seam and terminal UI.
//!
//! The engine never draws anything itself. It talks to a
//! [`MessageRenderer`], which the host implements for whatever displays
//! the transcript. The terminal front end here provides:
//! - [`viewport`]: which messages are on screen
//! - [`TranscriptView`]: the terminal's [`MessageRenderer`]
//! - [`render`]: ratatui drawing of the search bar, list and overlays

use std::ops::Range;

pub mod viewport;

mod overlays;
mod render;
mod status;
mod transcript_view;

pub use render::render;
pub use transcript_view::TranscriptView;

/// Display-side capability the engine drives.
pub trait MessageRenderer {
    /// Bring the message at `index` fully into view.
    fn scroll_into_view(&mut self, index: usize);

    /// Mark `ranges` (byte ranges of the message text) in the message at
    /// `index`. An empty slice removes every mark and restores the plain
    /// text.
    fn set_highlighted(&mut self, index: usize, ranges: &[Range<usize>]);
}

#[cfg(test)]
pub(crate) mod testing;
