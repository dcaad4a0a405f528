//! Translation errors.
//!
//! All of these are retryable by submitting the same input again.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranslateError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unsupported language code: {0}")]
    UnsupportedLanguage(String),
}
