use std::collections::BTreeMap;
use std::ops::Range;

use super::MessageRenderer;
use crate::transcript::ChatMessage;

/// Renders messages as text with `<mark>` tags, the way a DOM host would.
///
/// Like a DOM, marking an already-marked message wraps it again instead of
/// replacing the old tags, so double application shows up as nesting.
#[derive(Debug, Default)]
pub(crate) struct MarkupRenderer {
    texts: BTreeMap<usize, String>,
    layers: BTreeMap<usize, Vec<Vec<Range<usize>>>>,
    scrolls: Vec<usize>,
}

impl MarkupRenderer {
    pub(crate) fn new(messages: &[ChatMessage]) -> Self {
        Self {
            texts: messages
                .iter()
                .map(|m| (m.index, m.text.clone()))
                .collect(),
            ..Self::default()
        }
    }

    pub(crate) fn displayed(&self, index: usize) -> String {
        let text = self.texts.get(&index).cloned().unwrap_or_default();
        let Some(layers) = self.layers.get(&index) else {
            return text;
        };
        let depth = layers.len();
        let ranges = &layers[0];
        let mut out = String::new();
        let mut cursor = 0;
        for range in ranges {
            out.push_str(&text[cursor..range.start]);
            out.push_str(&"<mark>".repeat(depth));
            out.push_str(&text[range.clone()]);
            out.push_str(&"</mark>".repeat(depth));
            cursor = range.end;
        }
        out.push_str(&text[cursor..]);
        out
    }

    pub(crate) fn marked(&self) -> Vec<usize> {
        self.layers.keys().copied().collect()
    }

    pub(crate) fn scrolls(&self) -> &[usize] {
        &self.scrolls
    }
}

impl MessageRenderer for MarkupRenderer {
    fn scroll_into_view(&mut self, index: usize) {
        self.scrolls.push(index);
    }

    fn set_highlighted(&mut self, index: usize, ranges: &[Range<usize>]) {
        if ranges.is_empty() {
            self.layers.remove(&index);
        } else {
            self.layers.entry(index).or_default().push(ranges.to_vec());
        }
    }
}
