//! Cache error types.

use thiserror::Error;

/// Errors that can occur while loading or saving the cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// I/O error.
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The cache file could not be decoded.
    #[error("Cache file is corrupted: {0}")]
    Corrupted(String),

    /// Serialization error.
    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CacheError {
    /// Creates a corrupted-cache error.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Self::Corrupted(message.into())
    }
}
