//! Chat transcripts: the ordered message list the engine searches.
//!
//! The engine only ever reads messages through [`MessageSource`], and it
//! asks for a fresh snapshot on every user action because the host may
//! append, edit or delete messages between actions.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::Value;

/// Field names that carry message text, in lookup order.
const TEXT_FIELDS: &[&str] = &["mes", "text", "content"];

/// One chat message. `index` is its 0-based position ("floor").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub index: usize,
    pub name: Option<String>,
    pub text: String,
}

impl ChatMessage {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            name: None,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Read-only access to an ordered, index-addressable message list.
///
/// Indices are positions: the message at position `i` of the snapshot has
/// `index == i`, so valid floors are exactly `0..message_count()`. Hosts
/// that delete messages renumber the rest.
pub trait MessageSource {
    /// A snapshot of every message, ordered by index with no gaps.
    fn messages(&self) -> Vec<ChatMessage>;

    fn message_count(&self) -> usize {
        self.messages().len()
    }
}

impl MessageSource for Vec<ChatMessage> {
    fn messages(&self) -> Vec<ChatMessage> {
        self.clone()
    }

    fn message_count(&self) -> usize {
        self.len()
    }
}

/// A transcript loaded from a JSON or JSON Lines chat log.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    path: Option<PathBuf>,
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// Build an in-memory transcript from plain strings.
    pub fn from_texts<I, T>(texts: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let messages = texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| ChatMessage::new(index, text))
            .collect();
        Self {
            path: None,
            messages,
        }
    }

    /// Load a transcript from disk.
    ///
    /// # Errors
    /// Returns an error if the file can't be read or isn't a chat log.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript {}", path.display()))?;
        let messages = parse(&content)
            .with_context(|| format!("Failed to parse transcript {}", path.display()))?;
        tracing::info!(path = %path.display(), count = messages.len(), "transcript loaded");
        Ok(Self {
            path: Some(path.to_path_buf()),
            messages,
        })
    }

    /// Re-read the transcript from the path it was loaded from.
    ///
    /// In-memory transcripts have nothing to reload and are left unchanged.
    ///
    /// # Errors
    /// Returns an error if the file can't be read or parsed; the current
    /// messages are kept in that case.
    pub fn reload(&mut self) -> Result<()> {
        let Some(path) = self.path.clone() else {
            return Ok(());
        };
        *self = Self::load(&path)?;
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn as_slice(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn push(&mut self, text: impl Into<String>) {
        let index = self.messages.len();
        self.messages.push(ChatMessage::new(index, text));
    }
}

impl MessageSource for Transcript {
    fn messages(&self) -> Vec<ChatMessage> {
        self.messages.clone()
    }

    fn message_count(&self) -> usize {
        self.messages.len()
    }
}

/// Parse a JSON array or JSON Lines chat log.
///
/// Objects without a text field (such as a chat metadata header) are
/// skipped and do not consume an index.
///
/// # Errors
/// Returns an error naming the offending line when a line isn't JSON.
pub fn parse(content: &str) -> Result<Vec<ChatMessage>> {
    let trimmed = content.trim_start();
    let values = if trimmed.starts_with('[') {
        serde_json::from_str::<Vec<Value>>(trimmed).context("Invalid JSON array")?
    } else {
        let mut values = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Value>(line) {
                Ok(value) => values.push(value),
                Err(err) => bail!("Invalid JSON on line {}: {err}", line_no + 1),
            }
        }
        values
    };

    let messages = values
        .iter()
        .filter_map(|value| {
            let text = TEXT_FIELDS
                .iter()
                .find_map(|field| value.get(*field).and_then(Value::as_str))?;
            let name = value.get("name").and_then(Value::as_str);
            Some((text, name))
        })
        .enumerate()
        .map(|(index, (text, name))| match name {
            Some(name) => ChatMessage::new(index, text).with_name(name),
            None => ChatMessage::new(index, text),
        })
        .collect();
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_jsonl_skips_header_line() {
        let log = r#"{"user_name":"You","character_name":"Aria","create_date":"2024-01-01"}
{"name":"You","is_user":true,"mes":"hello there"}

{"name":"Aria","is_user":false,"mes":"Hello again"}
"#;
        let messages = parse(log).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].index, 0);
        assert_eq!(messages[0].text, "hello there");
        assert_eq!(messages[1].name.as_deref(), Some("Aria"));
        assert_eq!(messages[1].index, 1);
    }

    #[test]
    fn test_indices_stay_positional_after_push() {
        let mut transcript = Transcript::from_texts(["a", "b"]);
        transcript.push("c");
        let messages = transcript.messages();
        assert!(messages.iter().enumerate().all(|(pos, m)| m.index == pos));
        assert_eq!(transcript.message_count(), 3);
    }

    #[test]
    fn test_parse_json_array_with_alternate_fields() {
        let log = r#"[{"text":"first"},{"content":"second","name":"bot"}]"#;
        let messages = parse(log).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text, "first");
        assert_eq!(messages[1].text, "second");
    }

    #[test]
    fn test_parse_reports_bad_line_number() {
        let log = "{\"mes\":\"ok\"}\nnot json\n";
        let err = parse(log).unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn test_load_and_reload_picks_up_new_messages() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chat.jsonl");
        std::fs::write(&path, "{\"mes\":\"one\"}\n").unwrap();

        let mut transcript = Transcript::load(&path).unwrap();
        assert_eq!(transcript.message_count(), 1);

        std::fs::write(&path, "{\"mes\":\"one\"}\n{\"mes\":\"two\"}\n").unwrap();
        transcript.reload().unwrap();
        assert_eq!(transcript.message_count(), 2);
        assert_eq!(transcript.as_slice()[1].text, "two");
    }

    #[test]
    fn test_from_texts_assigns_indices() {
        let mut transcript = Transcript::from_texts(["a", "b"]);
        transcript.push("c");
        let indices: Vec<_> = transcript.messages().iter().map(|m| m.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert!(transcript.path().is_none());
    }
}
