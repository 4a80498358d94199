//! Query pipeline: validate, crisis check, extract, gate, score, rank.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use quotematch_core::error::{Error, Result};
use quotematch_core::traits::{QuoteRepository, QuoteService};
use quotematch_core::types::{FeatureVector, Quote, SearchOutcome, SearchResult};
use quotematch_text::{FeatureExtractor, Lexicon};

use crate::crisis::CrisisDetector;
use crate::ranker::rank;
use crate::scorer::{ScoreBreakdown, SimilarityScorer};
use crate::tone::{QueryMood, ToneFilter};

/// A quote with its features computed once at load time.
#[derive(Debug, Clone)]
struct IndexedQuote {
    quote: Quote,
    features: FeatureVector,
}

/// Per-quote diagnostics for one query.
#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    pub quote: Quote,
    pub quote_features: FeatureVector,
    /// `None` when the quote passed the tone filter.
    pub rejected_by: Option<String>,
    pub breakdown: ScoreBreakdown,
}

pub struct QuoteEngine {
    extractor: FeatureExtractor,
    crisis: CrisisDetector,
    tone: ToneFilter,
    scorer: SimilarityScorer,
    catalog: Option<Vec<IndexedQuote>>,
}

impl QuoteEngine {
    /// An engine with no quotes loaded; searches fail with `NotInitialized`.
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self {
            crisis: CrisisDetector::new(&lexicon),
            tone: ToneFilter::new(lexicon.clone()),
            extractor: FeatureExtractor::new(lexicon),
            scorer: SimilarityScorer::default(),
            catalog: None,
        }
    }

    pub fn with_scorer(mut self, scorer: SimilarityScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_quotes(mut self, quotes: Vec<Quote>) -> Self {
        self.install(quotes);
        self
    }

    pub fn initialize(&mut self, repository: &dyn QuoteRepository, source: &Path) -> Result<()> {
        let data = repository.load_quotes(source)?;
        self.install(data.quotes);
        Ok(())
    }

    fn install(&mut self, quotes: Vec<Quote>) {
        let catalog: Vec<IndexedQuote> = quotes
            .into_iter()
            .map(|quote| {
                let features = self.extractor.extract(&quote.text);
                IndexedQuote { quote, features }
            })
            .collect();
        let silent = catalog.iter().filter(|q| q.features.is_empty()).count();
        info!(quotes = catalog.len(), without_features = silent, lexicon = %self.extractor.lexicon().version, "engine ready");
        self.catalog = Some(catalog);
    }

    pub fn is_initialized(&self) -> bool { self.catalog.is_some() }

    pub fn quote_count(&self) -> usize { self.catalog.as_ref().map_or(0, Vec::len) }

    pub fn extractor(&self) -> &FeatureExtractor { &self.extractor }

    /// Fails with `InvalidConfig` when `top_n` is zero.
    pub fn search(&self, query: &str, top_n: usize) -> Result<SearchOutcome> {
        let catalog = self.prepare(query)?;
        if top_n == 0 {
            return Err(Error::InvalidConfig("top_n must be at least 1".to_string()));
        }
        if self.crisis.is_crisis(query) {
            warn!("crisis indicators detected, withholding quotes");
            return Ok(SearchOutcome::Crisis);
        }

        let query_features = self.extractor.extract(query);
        if query_features.is_empty() {
            debug!("query carries no lexicon signal");
            return Ok(SearchOutcome::NoMatch);
        }
        let mood = QueryMood::classify(&query_features);
        debug!(?mood, features = query_features.len(), "query analysed");

        let mut scored = Vec::new();
        for entry in catalog {
            if let Err(rejection) = self.tone.check_mood(mood, &entry.features, &entry.quote.text) {
                debug!(quote = %entry.quote.text, %rejection, "tone filter rejected");
                continue;
            }
            let score = self.scorer.score(&query_features, &entry.features);
            debug!(quote = %entry.quote.text, score, "scored");
            scored.push(SearchResult { quote: entry.quote.clone(), score });
        }

        Ok(rank(scored, top_n))
    }

    /// Filter verdict and score breakdown for every quote, in collection order.
    ///
    /// Crisis queries return no explanations so no quote data is surfaced.
    pub fn explain(&self, query: &str) -> Result<Vec<Explanation>> {
        let catalog = self.prepare(query)?;
        if self.crisis.is_crisis(query) {
            return Ok(Vec::new());
        }
        let query_features = self.extractor.extract(query);
        let mood = QueryMood::classify(&query_features);
        Ok(catalog
            .iter()
            .map(|entry| Explanation {
                quote: entry.quote.clone(),
                quote_features: entry.features.clone(),
                rejected_by: self.tone.check_mood(mood, &entry.features, &entry.quote.text).err().map(|r| r.to_string()),
                breakdown: self.scorer.breakdown(&query_features, &entry.features),
            })
            .collect())
    }

    fn prepare(&self, query: &str) -> Result<&[IndexedQuote]> {
        if query.trim().is_empty() {
            return Err(Error::EmptyQuery);
        }
        self.catalog.as_deref().ok_or(Error::NotInitialized)
    }
}

impl QuoteService for QuoteEngine {
    fn search_quotes(&self, query: &str, top_n: usize) -> Result<SearchOutcome> { self.search(query, top_n) }
}
