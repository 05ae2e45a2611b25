mod case;
mod tokenizer;

pub use case::{CaseShape, capitalize, match_case};
pub use tokenizer::{Token, Tokenizer};
