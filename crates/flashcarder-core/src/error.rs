//! Error types for the core crate.

use crate::study::StudyState;
use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Study session error.
    #[error("study error: {0}")]
    Study(#[from] StudyError),

    /// Deck or card lookup error.
    #[error("deck error: {0}")]
    Deck(#[from] DeckError),

    /// Rejected user input.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(#[from] flashcarder_storage::StorageError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid JSON/JSONC syntax.
    #[error("invalid config at {path}: {message}")]
    InvalidJson { path: String, message: String },

    /// Environment variable not found during substitution.
    #[error("environment variable not found: {name}")]
    EnvVarNotFound { name: String },

    /// Invalid path (e.g., could not determine config directory).
    #[error("invalid path: {0}")]
    InvalidPath(String),
}

/// Study session errors.
///
/// None of these leave the engine in a broken state; the session either
/// did not change or does not exist.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StudyError {
    /// The deck has no cards to study.
    #[error("no cards to study in deck {deck_id}")]
    EmptyDeck { deck_id: String },

    /// No session is active for the deck.
    #[error("not studying deck {deck_id}")]
    NotStudying { deck_id: String },

    /// The event is not valid in the current state.
    #[error("cannot {event} while {state}")]
    InvalidTransition {
        state: StudyState,
        event: &'static str,
    },

    /// The deck handed to the session is not the session's deck.
    #[error("session belongs to deck {expected}, got {actual}")]
    DeckMismatch { expected: String, actual: String },
}

/// Deck store lookup errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    /// Deck not found.
    #[error("deck not found: {id}")]
    NotFound { id: String },

    /// Card not found in deck.
    #[error("card {card_id} not found in deck {deck_id}")]
    CardNotFound { deck_id: String, card_id: String },

    /// Language category not found.
    #[error("language not found: {code}")]
    LanguageNotFound { code: String },

    /// Language category already exists.
    #[error("language already exists: {code} ({display_name})")]
    LanguageExists { code: String, display_name: String },
}

/// Input rejected at the add/edit boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was empty after trimming.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    /// Both sides of a card were empty.
    #[error("please fill in both sides of the card")]
    IncompleteCard,
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn study_error_messages() {
        let err = StudyError::EmptyDeck {
            deck_id: "dck_1".into(),
        };
        assert_eq!(err.to_string(), "no cards to study in deck dck_1");

        let err = StudyError::InvalidTransition {
            state: StudyState::RoundOneActive,
            event: "advance round",
        };
        assert_eq!(err.to_string(), "cannot advance round while reviewing round one");
    }

    #[test]
    fn core_error_wraps_deck_error() {
        let err: CoreError = DeckError::NotFound { id: "x".into() }.into();
        assert_eq!(err.to_string(), "deck error: deck not found: x");
    }

    #[test]
    fn validation_error_names_field() {
        let err = ValidationError::EmptyField { field: "title" };
        assert_eq!(err.to_string(), "title must not be empty");
    }
}
