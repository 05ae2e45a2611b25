//! Errors raised at the external collaborator boundary.

use thiserror::Error;

/// Errors that external engines may report.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The engine could not be reached or timed out.
    #[error("Engine unavailable: {0}")]
    Unavailable(String),

    /// The engine answered with something that could not be understood.
    #[error("Invalid engine response: {0}")]
    InvalidResponse(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PluginError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }
}
