//! Keyword matching over chat messages.
//!
//! Matching is case-insensitive substring containment. Comparison folds
//! both sides to Unicode lowercase one char at a time, so every reported
//! range sits on char boundaries of the original text and highlighting can
//! keep the source casing.

use std::ops::Range;

use crate::transcript::ChatMessage;

/// The winning message for a keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Index of the earliest message containing the keyword.
    pub index: usize,
    /// The first occurrence as it appears in the message (original casing).
    pub matched_text: String,
    /// Byte range of that occurrence within the message text.
    pub range: Range<usize>,
}

/// Find the lowest-index message whose text contains `keyword`.
///
/// Messages are scanned in list order, which is index order for any
/// [`MessageSource`](crate::transcript::MessageSource), and the first hit wins. An empty
/// keyword never matches; callers treat it as "clear" before getting here.
pub fn find_first(messages: &[ChatMessage], keyword: &str) -> Option<MatchResult> {
    let needle = fold(keyword);
    if needle.is_empty() {
        return None;
    }
    messages.iter().find_map(|message| {
        let range = next_match(&message.text, 0, &needle)?;
        Some(MatchResult {
            index: message.index,
            matched_text: message.text[range.clone()].to_string(),
            range,
        })
    })
}

/// Byte ranges of every non-overlapping occurrence of `keyword` in `text`.
pub fn match_ranges(text: &str, keyword: &str) -> Vec<Range<usize>> {
    let needle = fold(keyword);
    if needle.is_empty() {
        return Vec::new();
    }
    let mut ranges = Vec::new();
    let mut start = 0;
    while let Some(range) = next_match(text, start, &needle) {
        start = range.end;
        ranges.push(range);
    }
    ranges
}

fn fold(keyword: &str) -> Vec<char> {
    keyword.chars().flat_map(char::to_lowercase).collect()
}

fn next_match(text: &str, from: usize, needle: &[char]) -> Option<Range<usize>> {
    text[from..]
        .char_indices()
        .find_map(|(offset, _)| {
            let start = from + offset;
            match_len_at(&text[start..], needle).map(|len| start..start + len)
        })
}

/// Length in bytes of a match of `needle` at the very start of `text`.
fn match_len_at(text: &str, needle: &[char]) -> Option<usize> {
    let mut pos = 0;
    for (offset, ch) in text.char_indices() {
        for lower in ch.to_lowercase() {
            // A fold that runs past the needle would end mid-character.
            if needle.get(pos) != Some(&lower) {
                return None;
            }
            pos += 1;
        }
        if pos == needle.len() {
            return Some(offset + ch.len_utf8());
        }
    }
    None
}
