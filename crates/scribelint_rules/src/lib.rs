//! # scribelint_rules
//!
//! Plain-text detectors that run on every fast pass:
//!
//! - [`RuleEngine`] evaluates an ordered table of regex rules
//! - [`ClauseBoundaryDetector`] flags run-on and imperative clause junctions
//!
//! Both share the caller's pass-scoped [`SpanSet`](scribelint_ast::SpanSet):
//! a region claimed by an earlier detector is never flagged again.

mod clause;
mod engine;
mod error;
mod rule;
mod table;
mod words;

pub use clause::ClauseBoundaryDetector;
pub use engine::RuleEngine;
pub use error::RuleError;
pub use rule::{ComputeFn, Rule, RuleDescriptor, RuleSpec, Template};
pub use table::default_rules;
