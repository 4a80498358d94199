//! Weighted cosine similarity with sentiment and joy-vs-conflict penalties.

use serde::{Deserialize, Serialize};

use quotematch_core::types::{Dimension, FeatureVector, Sentiment};

const JOY_EMOTIONS: &[&str] = &["happy", "excited", "grateful"];
const CONFLICT_THEMES: &[&str] = &["challenge", "truth"];

/// Per-dimension multipliers applied to both vectors before the cosine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionWeights {
    pub emotion: f64,
    pub theme: f64,
    pub other: f64,
}

impl Default for DimensionWeights {
    fn default() -> Self { Self { emotion: 3.0, theme: 2.5, other: 1.0 } }
}

impl DimensionWeights {
    pub fn weight(&self, feature: &str) -> f64 {
        match Dimension::of(feature) {
            Dimension::Emotion => self.emotion,
            Dimension::Theme => self.theme,
            Dimension::Sentiment | Dimension::Tone | Dimension::Other => self.other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenaltyFactors {
    /// Negative query, positive quote.
    pub negative_to_positive: f64,
    /// Positive query, negative quote.
    pub positive_to_negative: f64,
    /// Neutral query, non-neutral quote.
    pub neutral_to_polar: f64,
    /// Joyful query, quote about challenge or truth.
    pub joy_vs_conflict: f64,
}

impl Default for PenaltyFactors {
    fn default() -> Self {
        Self { negative_to_positive: 0.4, positive_to_negative: 0.3, neutral_to_polar: 0.8, joy_vs_conflict: 0.3 }
    }
}

/// Intermediate values of one scoring, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub cosine: f64,
    pub sentiment_penalty: f64,
    pub tone_penalty: f64,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityScorer {
    weights: DimensionWeights,
    penalties: PenaltyFactors,
}

impl SimilarityScorer {
    pub fn new(weights: DimensionWeights, penalties: PenaltyFactors) -> Self { Self { weights, penalties } }

    pub fn score(&self, query: &FeatureVector, quote: &FeatureVector) -> f64 { self.breakdown(query, quote).score }

    pub fn breakdown(&self, query: &FeatureVector, quote: &FeatureVector) -> ScoreBreakdown {
        let cosine = self.weighted_cosine(query, quote);
        let sentiment_penalty = self.sentiment_penalty(query.sentiment(), quote.sentiment());
        let tone_penalty = self.tone_penalty(query, quote);
        let score = (cosine * sentiment_penalty * tone_penalty).clamp(0.0, 1.0);
        ScoreBreakdown { cosine, sentiment_penalty, tone_penalty, score }
    }

    /// Zero when either vector carries no signal.
    pub fn weighted_cosine(&self, query: &FeatureVector, quote: &FeatureVector) -> f64 {
        let mut dot = 0.0;
        let mut query_sq = 0.0;
        let mut quote_sq = 0.0;

        // Features absent from one side contribute only to the other's magnitude.
        for (name, value) in query.iter() {
            let w = self.weights.weight(name);
            let q = value * w;
            let t = quote.get(name) * w;
            dot += q * t;
            query_sq += q * q;
        }
        for (name, value) in quote.iter() {
            let t = value * self.weights.weight(name);
            quote_sq += t * t;
        }

        if query_sq == 0.0 || quote_sq == 0.0 {
            return 0.0;
        }
        dot / (query_sq.sqrt() * quote_sq.sqrt())
    }

    fn sentiment_penalty(&self, query: Sentiment, quote: Sentiment) -> f64 {
        match (query, quote) {
            (Sentiment::Negative, Sentiment::Positive) => self.penalties.negative_to_positive,
            (Sentiment::Positive, Sentiment::Negative) => self.penalties.positive_to_negative,
            (Sentiment::Neutral, Sentiment::Positive | Sentiment::Negative) => self.penalties.neutral_to_polar,
            _ => 1.0,
        }
    }

    fn tone_penalty(&self, query: &FeatureVector, quote: &FeatureVector) -> f64 {
        let joyful = JOY_EMOTIONS.iter().any(|e| query.has_emotion(e));
        let conflict = CONFLICT_THEMES.iter().any(|t| quote.has_theme(t));
        if joyful && conflict { self.penalties.joy_vs_conflict } else { 1.0 }
    }
}
