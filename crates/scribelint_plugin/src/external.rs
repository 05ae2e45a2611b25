//! Boundaries to collaborators that live outside this workspace.
//!
//! Both the grammar engine and the AI reviewer are black boxes: they receive a
//! text snapshot and answer with lints whose spans refer to that snapshot.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{Lint, PluginError};

/// A spelling/grammar engine queried on every fast pass.
pub trait GrammarEngine: Send + Sync + 'static {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Lints `text`. An error is treated as "no lints" by the caller.
    fn lint(&self, text: &str) -> impl Future<Output = Result<Vec<Lint>, PluginError>> + Send;
}

/// Result of an AI proofreading request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// False when the reviewer could not serve the request. This is a normal
    /// outcome, not an error.
    pub available: bool,
    /// Lints against the text that was sent.
    #[serde(default)]
    pub lints: Vec<Lint>,
}

impl Review {
    /// A review from a reviewer that could not answer.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// A successful review.
    pub fn with_lints(lints: Vec<Lint>) -> Self {
        Self {
            available: true,
            lints,
        }
    }
}

/// Tone requested for a rewrite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewriteTone {
    #[default]
    Neutral,
    Formal,
    Casual,
    Concise,
}

/// Options for [`AiReviewer::rewrite`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteOptions {
    /// Desired tone.
    #[serde(default)]
    pub tone: RewriteTone,
    /// Free-form extra instruction passed through verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
}

/// Result of an AI rewrite request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewrite {
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// An asynchronous, possibly unavailable, AI reviewer.
pub trait AiReviewer: Send + Sync + 'static {
    /// Proofreads `text`.
    fn proofread(&self, text: &str) -> impl Future<Output = Result<Review, PluginError>> + Send;

    /// Rewrites `text`.
    fn rewrite(
        &self,
        text: &str,
        options: &RewriteOptions,
    ) -> impl Future<Output = Result<Rewrite, PluginError>> + Send;
}

/// A grammar engine that never reports anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEngine;

impl GrammarEngine for NoopEngine {
    fn name(&self) -> &str {
        "noop"
    }

    async fn lint(&self, _text: &str) -> Result<Vec<Lint>, PluginError> {
        Ok(Vec::new())
    }
}

/// A reviewer that is never available.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableReviewer;

impl AiReviewer for UnavailableReviewer {
    async fn proofread(&self, _text: &str) -> Result<Review, PluginError> {
        Ok(Review::unavailable())
    }

    async fn rewrite(&self, _text: &str, _options: &RewriteOptions) -> Result<Rewrite, PluginError> {
        Ok(Rewrite::default())
    }
}
