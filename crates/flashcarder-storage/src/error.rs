//! Storage error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Why a read or write of a key failed.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be read, written or removed.
    #[error("could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored value does not match the expected shape, or the value
    /// could not be serialized.
    #[error("bad JSON under {key}: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Keys are plain names; separators and dot segments are refused.
    #[error("not a storage key: {0:?}")]
    InvalidKey(String),

    #[error("storage is read-only")]
    ReadOnly,

    #[error("storage lock poisoned")]
    LockPoisoned,
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(key: &str, source: serde_json::Error) -> Self {
        Self::Json {
            key: key.to_string(),
            source,
        }
    }

    /// The key involved, when the error is about a stored value.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Json { key, .. } | Self::InvalidKey(key) => Some(key),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_the_file() {
        let err = StorageError::io(
            "/data/studySessions.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(
            err.to_string(),
            "could not access /data/studySessions.json: denied"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn json_error_names_the_key() {
        let source = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let err = StorageError::json("languages", source);
        assert!(err.to_string().starts_with("bad JSON under languages"));
        assert_eq!(err.key(), Some("languages"));
    }

    #[test]
    fn invalid_key_is_quoted() {
        let err = StorageError::InvalidKey("../x".into());
        assert_eq!(err.to_string(), r#"not a storage key: "../x""#);
        assert_eq!(StorageError::ReadOnly.key(), None);
    }
}
