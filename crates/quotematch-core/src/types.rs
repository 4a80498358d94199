//! Domain types shared by the text and engine crates.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const EMOTION_PREFIX: &str = "emotion:";
pub const THEME_PREFIX: &str = "theme:";
pub const SENTIMENT_POSITIVE: &str = "sentiment:positive";
pub const SENTIMENT_NEGATIVE: &str = "sentiment:negative";
pub const TONE_ACTION: &str = "tone:action";
pub const TONE_REFLECTIVE: &str = "tone:reflective";

/// A single quotation. Identity is the text content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub movie: String,
    pub character: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, movie: impl Into<String>, character: impl Into<String>) -> Self {
        Self { text: text.into(), movie: movie.into(), character: character.into() }
    }
}

/// On-disk shape of a quote collection.
///
/// `query` is carried over from older collection files and is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteData {
    #[serde(default)]
    pub query: String,
    pub quotes: Vec<Quote>,
}

/// Namespace of a feature name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Emotion,
    Theme,
    Sentiment,
    Tone,
    Other,
}

impl Dimension {
    pub fn of(feature: &str) -> Self {
        match feature.split_once(':').map(|(ns, _)| ns) {
            Some("emotion") => Dimension::Emotion,
            Some("theme") => Dimension::Theme,
            Some("sentiment") => Dimension::Sentiment,
            Some("tone") => Dimension::Tone,
            _ => Dimension::Other,
        }
    }
}

pub fn emotion_key(name: &str) -> String { format!("{EMOTION_PREFIX}{name}") }

pub fn theme_key(name: &str) -> String { format!("{THEME_PREFIX}{name}") }

/// Sparse named feature weights (`emotion:*`, `theme:*`, `sentiment:*`, `tone:*`).
///
/// Weights are accumulated counts and are never negative. Absent features
/// read as `0.0`. Backed by an ordered map so iteration (and therefore
/// floating-point accumulation) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(BTreeMap<String, f64>);

impl FeatureVector {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, feature: &str) -> f64 { self.0.get(feature).copied().unwrap_or(0.0) }

    pub fn has(&self, feature: &str) -> bool { self.get(feature) > 0.0 }

    pub fn has_emotion(&self, name: &str) -> bool { self.has(&emotion_key(name)) }

    pub fn has_theme(&self, name: &str) -> bool { self.has(&theme_key(name)) }

    pub fn add(&mut self, feature: impl Into<String>, weight: f64) {
        *self.0.entry(feature.into()).or_insert(0.0) += weight;
    }

    /// Sets a feature only when `weight > 0`.
    pub fn set_count(&mut self, feature: impl Into<String>, weight: f64) {
        if weight > 0.0 {
            self.0.insert(feature.into(), weight);
        }
    }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ { self.0.keys().map(String::as_str) }

    pub fn sentiment(&self) -> Sentiment {
        let positive = self.get(SENTIMENT_POSITIVE);
        let negative = self.get(SENTIMENT_NEGATIVE);
        if positive > negative {
            Sentiment::Positive
        } else if negative > positive {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for FeatureVector {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut fv = FeatureVector::new();
        for (k, v) in iter { fv.add(k, v); }
        fv
    }
}

/// Overall polarity of a feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// A quote that survived filtering, with its confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub quote: Quote,
    pub score: f64,
}

/// The three-way result of a search.
///
/// `Crisis` carries no quote data and always takes precedence over the
/// other outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SearchOutcome {
    Matches(Vec<SearchResult>),
    Crisis,
    NoMatch,
}

impl SearchOutcome {
    pub fn results(&self) -> &[SearchResult] {
        match self {
            SearchOutcome::Matches(results) => results,
            SearchOutcome::Crisis | SearchOutcome::NoMatch => &[],
        }
    }

    pub fn is_crisis(&self) -> bool { matches!(self, SearchOutcome::Crisis) }
}
