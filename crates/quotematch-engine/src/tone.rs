//! Hard gate rejecting quotes whose register clashes with the query's mood.
//!
//! The query is classified into up to three independent mood classes; each
//! active class contributes its own blocklist and a quote must pass all of
//! them. Rejected quotes are never scored.

use std::fmt;
use std::sync::Arc;

use quotematch_core::types::{FeatureVector, SENTIMENT_NEGATIVE, SENTIMENT_POSITIVE};
use quotematch_text::Lexicon;

const POSITIVE_EMOTIONS: &[&str] = &["happy", "excited", "grateful", "loved"];
const CELEBRATORY_THEMES: &[&str] = &["family", "connection", "celebration", "home"];
const WORRIED_EMOTIONS: &[&str] = &["worried", "sad"];
const WORRIED_THEMES: &[&str] = &["health"];
const STRUGGLING_EMOTIONS: &[&str] = &["struggling", "overwhelmed", "tired"];
/// Sentiment counts must exceed this to mark a query positive or struggling on their own.
const SENTIMENT_COUNT_THRESHOLD: f64 = 1.0;

/// Mood classes detected in a query. Not mutually exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryMood {
    pub positive: bool,
    pub worried: bool,
    pub struggling: bool,
}

impl QueryMood {
    pub fn classify(query: &FeatureVector) -> Self {
        let any_emotion = |names: &[&str]| names.iter().any(|n| query.has_emotion(n));
        let any_theme = |names: &[&str]| names.iter().any(|n| query.has_theme(n));
        Self {
            positive: any_emotion(POSITIVE_EMOTIONS)
                || query.get(SENTIMENT_POSITIVE) > SENTIMENT_COUNT_THRESHOLD
                || any_theme(CELEBRATORY_THEMES),
            worried: any_emotion(WORRIED_EMOTIONS) || any_theme(WORRIED_THEMES),
            struggling: any_emotion(STRUGGLING_EMOTIONS) || query.get(SENTIMENT_NEGATIVE) > SENTIMENT_COUNT_THRESHOLD,
        }
    }
}

/// Why a quote was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    SeriousPhrase(String),
    DarkerThanQuery,
    InappropriatePhrase(String),
    DismissivePhrase(String),
    CheerfulPhrase(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::SeriousPhrase(p) => write!(f, "serious phrase '{p}' for a positive query"),
            Rejection::DarkerThanQuery => write!(f, "negative quote for a positive query"),
            Rejection::InappropriatePhrase(p) => write!(f, "inappropriate phrase '{p}' for a worried query"),
            Rejection::DismissivePhrase(p) => write!(f, "dismissive phrase '{p}' for a worried query"),
            Rejection::CheerfulPhrase(p) => write!(f, "cheerful phrase '{p}' for a struggling query"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ToneFilter {
    lexicon: Arc<Lexicon>,
}

impl ToneFilter {
    pub fn new(lexicon: Arc<Lexicon>) -> Self { Self { lexicon } }

    pub fn compatible(&self, query: &FeatureVector, quote: &FeatureVector, quote_text: &str) -> bool {
        self.check(query, quote, quote_text).is_ok()
    }

    /// Returns the first rule the quote fails, if any.
    pub fn check(&self, query: &FeatureVector, quote: &FeatureVector, quote_text: &str) -> Result<(), Rejection> {
        self.check_mood(QueryMood::classify(query), quote, quote_text)
    }

    pub fn check_mood(&self, mood: QueryMood, quote: &FeatureVector, quote_text: &str) -> Result<(), Rejection> {
        let text = quote_text.to_lowercase();
        let rules = &self.lexicon.tone_rules;

        if mood.positive {
            if let Some(p) = find_phrase(&text, &rules.serious_phrases) {
                return Err(Rejection::SeriousPhrase(p));
            }
            if quote.get(SENTIMENT_NEGATIVE) > quote.get(SENTIMENT_POSITIVE) {
                return Err(Rejection::DarkerThanQuery);
            }
        }

        if mood.worried {
            if let Some(p) = find_phrase(&text, &rules.inappropriate_phrases) {
                return Err(Rejection::InappropriatePhrase(p));
            }
            if let Some(p) = find_phrase(&text, &rules.dismissive_phrases) {
                return Err(Rejection::DismissivePhrase(p));
            }
        }

        if mood.struggling {
            if let Some(p) = find_phrase(&text, &rules.cheerful_phrases) {
                return Err(Rejection::CheerfulPhrase(p));
            }
        }

        Ok(())
    }
}

fn find_phrase(text: &str, phrases: &[String]) -> Option<String> {
    phrases.iter().find(|p| text.contains(p.to_lowercase().as_str())).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotematch_text::FeatureExtractor;

    struct Fixture {
        fx: FeatureExtractor,
        filter: ToneFilter,
    }

    impl Fixture {
        fn new() -> Self {
            let lexicon = Arc::new(Lexicon::builtin().unwrap());
            Self { fx: FeatureExtractor::new(lexicon.clone()), filter: ToneFilter::new(lexicon) }
        }

        fn check(&self, query: &str, quote: &str) -> Result<(), Rejection> {
            self.filter.check(&self.fx.extract(query), &self.fx.extract(quote), quote)
        }
    }

    #[test]
    fn mood_classes() {
        let f = Fixture::new();
        let happy = QueryMood::classify(&f.fx.extract("I'm very happy, meeting my family tonight"));
        assert!(happy.positive);

        let worried = QueryMood::classify(&f.fx.extract("My dog is sick, and I'm worried"));
        assert!(worried.worried);
        assert!(!worried.positive);

        let tired = QueryMood::classify(&f.fx.extract("exhausted"));
        assert!(tired.struggling);

        assert_eq!(QueryMood::classify(&FeatureVector::new()), QueryMood::default());
    }

    #[test]
    fn positive_query_blocks_serious_quotes() {
        let f = Fixture::new();
        let q = "I'm very happy, meeting my family tonight";
        assert_eq!(
            f.check(q, "I'm gonna make him an offer he can't refuse."),
            Err(Rejection::SeriousPhrase("refuse".to_string()))
        );
        assert!(f.check(q, "You're gonna need a bigger boat.").is_err());
        assert!(f.check(q, "There's no place like home.").is_ok());
    }

    #[test]
    fn positive_query_blocks_darker_quotes() {
        let f = Fixture::new();
        assert_eq!(
            f.check("so happy today", "Sometimes it's okay to be sad. Crying helps me slow down."),
            Err(Rejection::DarkerThanQuery)
        );
    }

    #[test]
    fn worried_query_blocks_threats_and_platitudes() {
        let f = Fixture::new();
        let q = "My dog is sick, and I'm worried";
        assert!(matches!(f.check(q, "You're gonna need a bigger boat."), Err(Rejection::InappropriatePhrase(_))));
        assert!(matches!(f.check(q, "I'll be back."), Err(Rejection::InappropriatePhrase(_))));
        assert!(matches!(
            f.check(q, "After all, tomorrow is another day!"),
            Err(Rejection::DismissivePhrase(_))
        ));
        assert!(f.check(q, "Just keep swimming.").is_ok());
    }

    #[test]
    fn struggling_query_blocks_cheerful_quotes() {
        let f = Fixture::new();
        assert_eq!(
            f.check("I'm exhausted and worn down", "To infinity and beyond!"),
            Err(Rejection::CheerfulPhrase("infinity and beyond".to_string()))
        );
    }

    #[test]
    fn neutral_query_passes_everything() {
        let f = Fixture::new();
        assert!(f.check("Silence.", "I'm gonna make him an offer he can't refuse.").is_ok());
        assert!(f.check("", "To infinity and beyond!").is_ok());
    }
}
