//! JSON-file quote repository.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::traits::QuoteRepository;
use crate::types::QuoteData;

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonQuoteRepository;

impl JsonQuoteRepository {
    pub fn new() -> Self { Self }

    pub fn parse(&self, json: &str, origin: &str) -> Result<QuoteData> {
        let data: QuoteData = serde_json::from_str(json)?;
        if data.quotes.is_empty() {
            return Err(Error::NoQuotes(origin.to_string()));
        }
        if let Some(pos) = data.quotes.iter().position(|q| q.text.trim().is_empty()) {
            return Err(Error::InvalidQuote(format!("quote #{} in {} has empty text", pos + 1, origin)));
        }
        Ok(data)
    }
}

impl QuoteRepository for JsonQuoteRepository {
    fn load_quotes(&self, path: &Path) -> Result<QuoteData> {
        debug!(path = %path.display(), "reading quote collection");
        let content = fs::read_to_string(path)?;
        let data = self.parse(&content, &path.display().to_string())?;
        info!(count = data.quotes.len(), path = %path.display(), "loaded quotes");
        Ok(data)
    }
}
