use std::path::Path;

use crate::error::Result;
use crate::types::{QuoteData, SearchOutcome};

/// Source of quote collections.
pub trait QuoteRepository: Send + Sync {
    fn load_quotes(&self, path: &Path) -> Result<QuoteData>;
}

/// Matches a free-text query against a loaded quote collection.
pub trait QuoteService: Send + Sync {
    /// `top_n` must be at least 1; zero is rejected with `Error::InvalidConfig`.
    fn search_quotes(&self, query: &str, top_n: usize) -> Result<SearchOutcome>;
}
