//! Error types for the zodiac consultation workspace.
//!
//! One enum covers the whole system. The variants fall into four groups:
//! classifier integrity faults, caller sequencing mistakes, failures of the
//! external retrieval/generation services, and ambient plumbing errors
//! (configuration, I/O, serialization).

use thiserror::Error;

/// Unified error type.
///
/// Every variant carries the offending value so the CLI can render a
/// precise message without re-deriving context.
#[derive(Error, Debug)]
pub enum AppError {
    /// A month/day pair that does not exist on the calendar.
    #[error("Invalid date: month {month}, day {day} is not a calendar date")]
    InvalidDate { month: u32, day: u32 },

    /// A sign table boundary such as "Xyz 5" that cannot be parsed.
    #[error("Malformed date range boundary: {0:?}")]
    MalformedRange(String),

    /// No range of the sign table contains the given day.
    #[error("No category covers {month:02}-{day:02}; the sign table has a gap")]
    UnresolvedCategory { month: u32, day: u32 },

    /// Two ranges of the sign table contain the same day.
    #[error("Date {month:02}-{day:02} falls in both {first} and {second}")]
    OverlappingRanges {
        month: u32,
        day: u32,
        first: String,
        second: String,
    },

    /// The sign table does not hold one range per sign.
    #[error("Sign table must have exactly 12 ranges, found {0}")]
    RangeCount(usize),

    /// `answer` was called before any category was bound.
    #[error("No category bound; register a birth date before asking")]
    NotBound,

    /// The session slot is empty.
    #[error("No user registered. Please register first.")]
    NoUserRegistered,

    /// The document index has not ingested its corpus yet.
    #[error("Document index is not ready; ingest the reference document first")]
    IndexNotReady,

    /// Similarity search failed.
    #[error("Document index unavailable: {0}")]
    IndexUnavailable(String),

    /// Answer generation failed.
    #[error("Answer generation failed: {0}")]
    Generation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document parsing, chunking and embedding errors
    #[error("Knowledge error: {0}")]
    Knowledge(String),

    /// LLM transport errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Prompt template errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Whether the caller can recover by re-sequencing or retrying.
    ///
    /// Integrity faults of the sign table are never recoverable.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            AppError::MalformedRange(_)
                | AppError::UnresolvedCategory { .. }
                | AppError::OverlappingRanges { .. }
                | AppError::RangeCount(_)
        )
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_range_names_input() {
        let err = AppError::MalformedRange("Xyz 5".to_string());
        assert!(err.to_string().contains("\"Xyz 5\""));
    }

    #[test]
    fn test_unresolved_category_message() {
        let err = AppError::UnresolvedCategory { month: 2, day: 9 };
        assert_eq!(
            err.to_string(),
            "No category covers 02-09; the sign table has a gap"
        );
    }

    #[test]
    fn test_range_count_message() {
        assert_eq!(
            AppError::RangeCount(11).to_string(),
            "Sign table must have exactly 12 ranges, found 11"
        );
    }

    #[test]
    fn test_recoverability() {
        assert!(AppError::NotBound.is_recoverable());
        assert!(AppError::Generation("timeout".to_string()).is_recoverable());
        assert!(!AppError::MalformedRange("Foo 1".to_string()).is_recoverable());
        assert!(!AppError::UnresolvedCategory { month: 1, day: 1 }.is_recoverable());
        assert!(!AppError::RangeCount(2).is_recoverable());
    }
}
