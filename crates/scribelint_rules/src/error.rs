//! Rule error types.

use thiserror::Error;

/// Errors raised while building a rule.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The pattern failed to compile.
    #[error("Rule '{id}' has an invalid pattern: {source}")]
    InvalidPattern {
        id: String,
        #[source]
        source: regex::Error,
    },

    /// The requested capture group does not exist in the pattern.
    #[error("Rule '{id}' requests capture {capture} but the pattern has {groups} group(s)")]
    CaptureOutOfRange {
        id: String,
        capture: usize,
        groups: usize,
    },
}

impl RuleError {
    /// Returns the id of the offending rule.
    pub fn rule_id(&self) -> &str {
        match self {
            Self::InvalidPattern { id, .. } | Self::CaptureOutOfRange { id, .. } => id,
        }
    }
}
