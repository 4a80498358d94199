use quotematch_text::Lexicon;

/// Substring scan of the raw query for self-harm indicator phrases.
///
/// Biased toward over-triggering: any phrase occurring anywhere in the
/// lowercased query counts, with no tokenization or word boundaries.
#[derive(Debug, Clone)]
pub struct CrisisDetector {
    phrases: Vec<String>,
}

impl CrisisDetector {
    pub fn new(lexicon: &Lexicon) -> Self {
        Self { phrases: lexicon.crisis_phrases.iter().map(|p| p.to_lowercase()).collect() }
    }

    pub fn is_crisis(&self, raw_query: &str) -> bool {
        let query = normalize(raw_query);
        self.phrases.iter().any(|p| query.contains(p.as_str()))
    }
}

/// Lowercase and fold typographic apostrophes so "can’t" matches "can't".
fn normalize(text: &str) -> String { text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'") }
