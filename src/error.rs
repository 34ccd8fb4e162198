//! User-facing error kinds.
//!
//! Every variant is recoverable. The `Display` text is what the feedback
//! line (or the floor dialog's inline error) shows to the user.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// No message contains the keyword.
    #[error("No message contains \"{keyword}\"")]
    NoMatch { keyword: String },

    /// A search or jump was attempted while the transcript is empty.
    #[error("There are no messages to search")]
    EmptyMessageList,

    /// Floor dialog input that is not an integer.
    #[error("\"{input}\" is not a valid floor number")]
    InvalidFloor { input: String },

    /// A floor outside `0..count`. `max` is the last valid floor.
    #[error("Floor {floor} is out of range (0–{max})")]
    FloorOutOfRange { floor: i64, max: usize },
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_names_keyword() {
        let err = SearchError::NoMatch {
            keyword: "dragon".to_string(),
        };
        assert_eq!(err.to_string(), "No message contains \"dragon\"");
    }

    #[test]
    fn test_out_of_range_shows_bounds() {
        let err = SearchError::FloorOutOfRange { floor: 3, max: 1 };
        assert_eq!(err.to_string(), "Floor 3 is out of range (0–1)");
    }
}
