//! The jump-to-floor dialog.
//!
//! `Closed -> Open -> Closed`, leaving `Open` only through cancel or a
//! valid submit. Invalid input keeps the dialog open with an inline error.

use crate::error::{Result, SearchError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FloorDialog {
    #[default]
    Closed,
    Open {
        /// Message count when the dialog was opened or last re-prompted.
        count: usize,
        /// Inline error from the last rejected submit.
        error: Option<String>,
    },
}

impl FloorDialog {
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// Open the dialog for a transcript of `count` messages.
    pub fn open(&mut self, count: usize) {
        *self = Self::Open { count, error: None };
    }

    pub fn cancel(&mut self) {
        *self = Self::Closed;
    }

    /// The valid range shown to the user, e.g. `0–41`.
    pub fn range_hint(&self) -> Option<String> {
        match self {
            Self::Closed => None,
            Self::Open { count, .. } => Some(range_hint(*count)),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Open { error, .. } => error.as_deref(),
            Self::Closed => None,
        }
    }

    /// Validate `input` against the current `count`.
    ///
    /// On success the dialog closes and the floor is returned. On failure
    /// the dialog stays open, its hint refreshed for `count`, with the error
    /// shown inline. Submitting to a closed dialog is ignored.
    ///
    /// # Errors
    /// Returns the rejection so the caller can log it.
    pub fn submit(&mut self, input: &str, count: usize) -> Result<Option<usize>> {
        if !self.is_open() {
            return Ok(None);
        }
        match parse_floor(input, count) {
            Ok(floor) => {
                *self = Self::Closed;
                Ok(Some(floor))
            }
            Err(err) => {
                *self = Self::Open {
                    count,
                    error: Some(err.to_string()),
                };
                Err(err)
            }
        }
    }
}

/// Parse a user-entered floor for a transcript of `count` messages.
///
/// # Errors
/// [`SearchError::InvalidFloor`] for non-integers,
/// [`SearchError::EmptyMessageList`] when there is nothing to jump to and
/// [`SearchError::FloorOutOfRange`] outside `0..count`.
pub fn parse_floor(input: &str, count: usize) -> Result<usize> {
    let trimmed = input.trim();
    let floor: i64 = trimmed.parse().map_err(|_| SearchError::InvalidFloor {
        input: trimmed.to_string(),
    })?;
    if count == 0 {
        return Err(SearchError::EmptyMessageList);
    }
    usize::try_from(floor)
        .ok()
        .filter(|floor| *floor < count)
        .ok_or(SearchError::FloorOutOfRange {
            floor,
            max: count - 1,
        })
}

fn range_hint(count: usize) -> String {
    match count.checked_sub(1) {
        Some(max) => format!("0–{max}"),
        None => "no messages".to_string(),
    }
}
