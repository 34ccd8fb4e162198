use std::collections::HashMap;
use std::ops::Range;

use super::MessageRenderer;
use super::viewport::Viewport;

/// Terminal-side state for the message list: scroll position, marks and
/// the message the last jump landed on.
#[derive(Debug, Clone)]
pub struct TranscriptView {
    viewport: Viewport,
    highlights: HashMap<usize, Vec<Range<usize>>>,
    focused: Option<usize>,
}

impl TranscriptView {
    pub fn new(height: u16, total: usize) -> Self {
        Self {
            viewport: Viewport::new(height, total),
            highlights: HashMap::new(),
            focused: None,
        }
    }

    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub const fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Match the viewport to the current list height and message count.
    pub fn sync(&mut self, height: u16, total: usize) {
        if self.viewport.height() != height {
            self.viewport.resize(height);
        }
        if self.viewport.total() != total {
            self.viewport.set_total(total);
        }
        if self.focused.is_some_and(|index| index >= total) {
            self.focused = None;
        }
    }

    pub fn highlights(&self, index: usize) -> &[Range<usize>] {
        self.highlights.get(&index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub const fn focused(&self) -> Option<usize> {
        self.focused
    }
}

impl MessageRenderer for TranscriptView {
    fn scroll_into_view(&mut self, index: usize) {
        self.viewport.ensure_visible(index);
        self.focused = Some(index);
    }

    fn set_highlighted(&mut self, index: usize, ranges: &[Range<usize>]) {
        if ranges.is_empty() {
            self.highlights.remove(&index);
        } else {
            self.highlights.insert(index, ranges.to_vec());
        }
    }
}
