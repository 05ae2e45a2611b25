//! Cache entry types.

use serde::{Deserialize, Serialize};
use scribelint_plugin::Lint;

/// Lints computed for one exact text under one configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// BLAKE3 hash of `text`.
    pub content_hash: String,

    /// The text that was linted.
    pub text: String,

    /// Hash of the configuration used.
    pub config_hash: String,

    /// Cached lints, spans relative to `text`.
    pub lints: Vec<Lint>,

    /// Timestamp when this entry was created.
    pub created_at: u64,
}

impl CacheEntry {
    /// Creates a new cache entry.
    pub fn new(text: impl Into<String>, config_hash: impl Into<String>, lints: Vec<Lint>) -> Self {
        let text = text.into();
        Self {
            content_hash: hash_text(&text),
            text,
            config_hash: config_hash.into(),
            lints,
            created_at: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    /// Checks that this entry was computed for exactly `text` under `config_hash`.
    pub fn is_valid(&self, content_hash: &str, text: &str, config_hash: &str) -> bool {
        self.content_hash == content_hash && self.config_hash == config_hash && self.text == text
    }
}

/// Computes the BLAKE3 hash of `text`.
pub(crate) fn hash_text(text: &str) -> String {
    blake3::hash(text.as_bytes()).to_hex().to_string()
}
