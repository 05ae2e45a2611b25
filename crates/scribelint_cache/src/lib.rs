//! # scribelint_cache
//!
//! Memoises fast-pass results keyed by the exact text that was linted.
//!
//! Entries are looked up by the BLAKE3 hash of the text and confirmed with an
//! exact comparison, so a hash collision can never return lints for another
//! snapshot. The cache is bounded and evicts the oldest-inserted entry first.

mod entry;
mod error;
mod manager;

pub use entry::CacheEntry;
pub use error::CacheError;
pub use manager::{DEFAULT_CAPACITY, LintCache};
