//! Token sequence to sparse feature vector.
//!
//! Category keywords match a token in either direction of substring
//! containment, which approximates stemming ("overwhelm" hits both
//! "overwhelmed" and "overwhelming"). Every keyword hit adds 1.0 to its
//! category and spreads 0.3 to each related emotion. Sentiment and tone
//! words only match exactly.

use std::sync::Arc;

use quotematch_core::types::{
    emotion_key, theme_key, FeatureVector, SENTIMENT_NEGATIVE, SENTIMENT_POSITIVE, TONE_ACTION, TONE_REFLECTIVE,
};

use crate::lexicon::Lexicon;
use crate::tokenize::Tokenizer;

pub const KEYWORD_HIT_WEIGHT: f64 = 1.0;
pub const RELATED_EMOTION_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    lexicon: Arc<Lexicon>,
    tokenizer: Tokenizer,
}

impl FeatureExtractor {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        let tokenizer = Tokenizer::new(&lexicon);
        Self { lexicon, tokenizer }
    }

    pub fn lexicon(&self) -> &Lexicon { &self.lexicon }

    pub fn tokenizer(&self) -> &Tokenizer { &self.tokenizer }

    /// Empty or all-stop-word text yields an empty vector ("no signal").
    pub fn extract(&self, text: &str) -> FeatureVector {
        let tokens = self.tokenizer.tokenize(text);
        self.extract_tokens(&tokens)
    }

    pub fn extract_tokens(&self, tokens: &[String]) -> FeatureVector {
        let mut features = FeatureVector::new();
        if tokens.is_empty() {
            return features;
        }

        for (emotion, keywords) in &self.lexicon.emotions {
            let hits = keyword_hits(tokens, keywords);
            if hits == 0 {
                continue;
            }
            let hits = hits as f64;
            features.add(emotion_key(emotion), KEYWORD_HIT_WEIGHT * hits);
            for related in self.lexicon.related_emotions(emotion) {
                features.add(emotion_key(related), RELATED_EMOTION_WEIGHT * hits);
            }
        }

        for (theme, keywords) in &self.lexicon.themes {
            let hits = keyword_hits(tokens, keywords);
            if hits > 0 {
                features.add(theme_key(theme), KEYWORD_HIT_WEIGHT * hits as f64);
            }
        }

        features.set_count(SENTIMENT_POSITIVE, exact_hits(tokens, &self.lexicon.positive_words));
        features.set_count(SENTIMENT_NEGATIVE, exact_hits(tokens, &self.lexicon.negative_words));
        features.set_count(TONE_ACTION, exact_hits(tokens, &self.lexicon.action_words));
        features.set_count(TONE_REFLECTIVE, exact_hits(tokens, &self.lexicon.reflective_words));

        features
    }
}

fn matches_keyword(token: &str, keyword: &str) -> bool { token.contains(keyword) || keyword.contains(token) }

/// Number of (token, keyword) pairs that match.
fn keyword_hits(tokens: &[String], keywords: &[String]) -> usize {
    tokens
        .iter()
        .map(|t| keywords.iter().filter(|k| matches_keyword(t, k)).count())
        .sum()
}

fn exact_hits(tokens: &[String], words: &[String]) -> f64 {
    tokens.iter().filter(|t| words.iter().any(|w| w == *t)).count() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> FeatureExtractor { FeatureExtractor::new(Arc::new(Lexicon::builtin().unwrap())) }

    fn approx(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

    #[test]
    fn partial_match_in_both_directions() {
        let fx = extractor();
        // token contains keyword
        assert!(fx.extract("overwhelming").has_emotion("overwhelmed"));
        // keyword contains token
        assert!(fx.extract("overwhelm").has_emotion("overwhelmed"));
    }

    #[test]
    fn related_emotions_spread() {
        let f = extractor().extract("overwhelmed");
        assert!(approx(f.get("emotion:overwhelmed"), 1.0));
        assert!(approx(f.get("emotion:stressed"), 0.3));
        assert!(approx(f.get("emotion:anxious"), 0.3));
        assert!(approx(f.get("emotion:tired"), 0.3));
    }

    #[test]
    fn spreading_is_additive() {
        // "happy" hits happy, whose relations include excited and grateful.
        let f = extractor().extract("happy");
        assert!(approx(f.get("emotion:happy"), 1.0));
        assert!(approx(f.get("emotion:excited"), 0.3));
        assert!(approx(f.get("emotion:grateful"), 0.3));
        assert!(approx(f.get("emotion:content"), 0.3));
        assert!(approx(f.get("sentiment:positive"), 1.0));
    }

    #[test]
    fn themes_do_not_spread() {
        let f = extractor().extract("hospital");
        assert!(approx(f.get("theme:health"), 1.0));
        assert_eq!(f.names().filter(|n| n.starts_with("emotion:")).count(), 0);
    }

    #[test]
    fn sentiment_and_tone_need_exact_tokens() {
        let fx = extractor();
        let f = fx.extract("great fun, think");
        assert!(approx(f.get("sentiment:positive"), 2.0));
        assert!(approx(f.get("tone:reflective"), 1.0));
        // "greatest" is not an exact positive word
        assert!(!fx.extract("greatest").has("sentiment:positive"));
    }

    #[test]
    fn negative_sentiment_counts() {
        let f = extractor().extract("bad awful pain");
        assert!(approx(f.get("sentiment:negative"), 3.0));
        assert!(!f.has("sentiment:positive"));
    }

    #[test]
    fn no_signal_text_is_empty() {
        let fx = extractor();
        assert!(fx.extract("").is_empty());
        assert!(fx.extract("the and of").is_empty());
        assert!(fx.extract("Silence.").is_empty());
    }

    #[test]
    fn deterministic() {
        let fx = extractor();
        let q = "I'm very happy, meeting my family tonight";
        assert_eq!(fx.extract(q), fx.extract(q));
    }
}
