//! # scribelint_plugin
//!
//! The lint data model and the boundaries to external collaborators.
//!
//! This crate provides:
//! - [`Lint`], [`Suggestion`] and [`Fix`], the records every stage produces
//! - [`GrammarEngine`], the contract of the external grammar/spell engine
//! - [`AiReviewer`], the contract of the slow, optional AI reviewer
//!
//! Neither collaborator is implemented here beyond trivial stand-ins; hosts
//! plug their own implementations into the core pipeline.

mod diagnostic;
mod error;
mod external;

pub use diagnostic::{Category, Fix, Lint, LintKind, LintSource, Suggestion, SuggestionKind};
pub use error::PluginError;
pub use external::{
    AiReviewer, GrammarEngine, NoopEngine, Review, Rewrite, RewriteOptions, RewriteTone,
    UnavailableReviewer,
};
