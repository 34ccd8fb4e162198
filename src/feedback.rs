//! Transient status and error text.
//!
//! One message is visible at a time with one dismiss deadline. Showing a
//! new message replaces both, so an earlier deadline can never dismiss a
//! later message.

use std::time::{Duration, Instant};

/// How long a message stays visible.
pub const DISMISS_AFTER: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
struct Notice {
    level: FeedbackLevel,
    text: String,
    expires_at: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct Feedback {
    notice: Option<Notice>,
}

impl Feedback {
    pub fn show(&mut self, level: FeedbackLevel, text: impl Into<String>, now: Instant) {
        self.notice = Some(Notice {
            level,
            text: text.into(),
            expires_at: now + DISMISS_AFTER,
        });
    }

    pub fn error(&mut self, text: impl Into<String>, now: Instant) {
        self.show(FeedbackLevel::Error, text, now);
    }

    pub fn clear(&mut self) {
        self.notice = None;
    }

    /// Dismiss the message once its deadline has passed.
    ///
    /// Returns true when something was dismissed.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self
            .notice
            .as_ref()
            .is_some_and(|notice| notice.expires_at <= now)
        {
            self.notice = None;
            return true;
        }
        false
    }

    pub fn text(&self) -> Option<&str> {
        self.notice.as_ref().map(|notice| notice.text.as_str())
    }

    pub fn active(&self) -> Option<(&str, FeedbackLevel)> {
        self.notice
            .as_ref()
            .map(|notice| (notice.text.as_str(), notice.level))
    }

    /// When the current message will be dismissed.
    pub fn deadline(&self) -> Option<Instant> {
        self.notice.as_ref().map(|notice| notice.expires_at)
    }
}
