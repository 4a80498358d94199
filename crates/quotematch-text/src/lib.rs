//! quotematch-text
//!
//! The lexicon knowledge base and the text side of matching: tokenizing raw
//! text and turning tokens into sparse emotion/theme/sentiment/tone features.
pub mod features;
pub mod lexicon;
pub mod tokenize;

pub use features::FeatureExtractor;
pub use lexicon::{Lexicon, ToneRules};
pub use tokenize::Tokenizer;
