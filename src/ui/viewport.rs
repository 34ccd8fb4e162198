//! Viewport management for the message list.
//!
//! The [`Viewport`] tracks which messages are on screen. One message
//! occupies one row.

use std::ops::Range;

/// Manages the visible portion of a transcript.
///
/// # Example
///
/// ```
/// use msgseek::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(10, 100);
/// assert_eq!(vp.visible_range(), 0..10);
///
/// vp.ensure_visible(42);
/// assert!(vp.visible_range().contains(&42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    height: u16,
    offset: usize,
    total: usize,
}

impl Viewport {
    /// Create a viewport `height` rows tall over `total` messages.
    pub const fn new(height: u16, total: usize) -> Self {
        Self {
            height,
            offset: 0,
            total,
        }
    }

    /// Index of the first visible message.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn total(&self) -> usize {
        self.total
    }

    /// Indices of the visible messages, clamped to the transcript.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.offset;
        let end = (self.offset + self.height as usize).min(self.total);
        start..end
    }

    /// Get the scroll percentage (0-100).
    pub fn scroll_percent(&self) -> u8 {
        let max_offset = self.max_offset();
        if max_offset == 0 {
            return 100;
        }

        // Percentage value always 0-100
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        {
            ((self.offset as f64 / max_offset as f64) * 100.0).round() as u8
        }
    }

    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = (self.offset + n).min(self.max_offset());
    }

    pub const fn page_up(&mut self) {
        self.scroll_up(self.height as usize);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height as usize);
    }

    /// Scroll the least amount needed to put `index` on screen.
    ///
    /// Grows the known total when `index` lies past it, since the
    /// transcript may have gained messages since the last sync.
    pub fn ensure_visible(&mut self, index: usize) {
        if index >= self.total {
            self.total = index + 1;
        }
        if index < self.offset || self.height == 0 {
            // Not laid out yet; resize clamps the anchor onto the last page.
            self.offset = index;
        } else if index >= self.offset + self.height as usize {
            self.offset = index + 1 - self.height as usize;
        }
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn resize(&mut self, height: u16) {
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the message count (e.g., after reload).
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.offset = self.offset.min(self.max_offset());
    }

    const fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.height as usize)
    }
}
