//! quotematch-core
//!
//! Domain types, error taxonomy, seam traits, configuration and the JSON
//! quote loader shared by the text and engine crates.
#![deny(unused_imports)]

pub mod config;
pub mod error;
pub mod loader;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use types::{FeatureVector, Quote, QuoteData, SearchOutcome, SearchResult, Sentiment};
