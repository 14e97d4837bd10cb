//! Error type for plan storage

use thiserror::Error;

/// Errors raised by a [`PlanStore`](super::PlanStore) or its typed helpers
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// File involved
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A stored value is not valid JSON or does not match the expected shape
    #[error("Invalid stored value for '{key}': {source}")]
    Json {
        /// Storage key
        key: String,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Keys are limited to ASCII letters, digits, '_' and '-'
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),
}

impl StoreError {
    /// Wrap an I/O error with the path it concerns
    #[must_use]
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap a JSON error with the key it concerns
    #[must_use]
    pub fn json(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            key: key.into(),
            source,
        }
    }
}
