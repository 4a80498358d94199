use std::collections::HashSet;

use crate::lexicon::Lexicon;

/// Punctuation replaced by a space before splitting.
const SPLIT_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', '(', ')'];
/// Quote marks removed outright, so "don't" becomes "dont".
const DROPPED_PUNCTUATION: &[char] = &['\'', '"'];

/// Lowercasing word tokenizer with stop-word filtering. No stemming.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    stop_words: HashSet<String>,
    min_token_chars: usize,
}

impl Tokenizer {
    pub fn new(lexicon: &Lexicon) -> Self {
        Self::with_stop_words(lexicon.stop_words.iter().cloned())
    }

    pub fn with_stop_words<I: IntoIterator<Item = String>>(stop_words: I) -> Self {
        Self { stop_words: stop_words.into_iter().map(|w| w.to_lowercase()).collect(), min_token_chars: 2 }
    }

    pub fn is_stop_word(&self, word: &str) -> bool { self.stop_words.contains(word) }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized: String = text
            .to_lowercase()
            .chars()
            .filter(|c| !DROPPED_PUNCTUATION.contains(c))
            .map(|c| if SPLIT_PUNCTUATION.contains(&c) { ' ' } else { c })
            .collect();
        normalized
            .split_whitespace()
            .filter(|w| w.chars().count() >= self.min_token_chars && !self.is_stop_word(w))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenizer() -> Tokenizer { Tokenizer::new(&Lexicon::builtin().unwrap()) }

    #[test]
    fn strips_punctuation_and_stop_words() {
        let tokens = tokenizer().tokenize("I'm very happy, meeting my family tonight!");
        assert_eq!(tokens, ["im", "very", "happy", "meeting", "my", "family", "tonight"]);
    }

    #[test]
    fn drops_single_characters() {
        assert_eq!(tokenizer().tokenize("a b c I x"), Vec::<String>::new());
    }

    #[test]
    fn apostrophes_join_words() {
        assert_eq!(tokenizer().tokenize("Don't (really) \"care\"."), ["dont", "really", "care"]);
    }

    #[test]
    fn empty_and_stop_word_only_text() {
        let t = tokenizer();
        assert!(t.tokenize("").is_empty());
        assert!(t.tokenize("   ").is_empty());
        assert!(t.tokenize("The, and; of: the!").is_empty());
    }

    #[test]
    fn no_stemming() {
        assert_eq!(tokenizer().tokenize("Overwhelmed overwhelming"), ["overwhelmed", "overwhelming"]);
    }
}
