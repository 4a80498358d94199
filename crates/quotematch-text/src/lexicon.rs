//! Emotion/theme lexicon.
//!
//! The lexicon is plain configuration data: keyword lists per emotion and
//! theme category, emotion relation edges, exact-match word lists, stop words,
//! crisis phrases and the phrase lists used by the tone filter. A default
//! lexicon is bundled with the crate; an alternative can be loaded from JSON.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::info;

use quotematch_core::error::{Error, Result};

const BUILTIN_LEXICON: &str = include_str!("lexicon.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    pub version: String,
    #[serde(deserialize_with = "unique_categories")]
    pub emotions: BTreeMap<String, Vec<String>>,
    #[serde(default, deserialize_with = "unique_categories")]
    pub emotion_relations: BTreeMap<String, Vec<String>>,
    #[serde(deserialize_with = "unique_categories")]
    pub themes: BTreeMap<String, Vec<String>>,
    pub positive_words: Vec<String>,
    pub negative_words: Vec<String>,
    pub action_words: Vec<String>,
    pub reflective_words: Vec<String>,
    pub stop_words: Vec<String>,
    pub crisis_phrases: Vec<String>,
    pub tone_rules: ToneRules,
}

/// Phrase blocklists applied by the tone filter, matched against lowercased quote text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneRules {
    /// Serious or conflict phrasing, blocked for positive/celebratory queries.
    pub serious_phrases: Vec<String>,
    /// Threatening or dismissive phrasing, blocked for worried queries.
    pub inappropriate_phrases: Vec<String>,
    /// Platitudes that minimise an immediate concern, blocked for worried queries.
    pub dismissive_phrases: Vec<String>,
    /// Overly cheerful phrasing, blocked for struggling queries.
    pub cheerful_phrases: Vec<String>,
}

impl Lexicon {
    /// The lexicon bundled with this crate.
    pub fn builtin() -> Result<Self> { Self::from_json(BUILTIN_LEXICON) }

    /// Parse, lowercase every word list and validate.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut lexicon: Lexicon = serde_json::from_str(json).map_err(|e| invalid(e.to_string()))?;
        lexicon.normalize();
        lexicon.validate()?;
        Ok(lexicon)
    }

    /// Tokens are always lowercase, so matched word lists must be too.
    pub fn normalize(&mut self) {
        for keywords in self.emotions.values_mut().chain(self.themes.values_mut()) {
            lowercase_all(keywords);
        }
        for list in [
            &mut self.positive_words,
            &mut self.negative_words,
            &mut self.action_words,
            &mut self.reflective_words,
            &mut self.stop_words,
            &mut self.crisis_phrases,
            &mut self.tone_rules.serious_phrases,
            &mut self.tone_rules.inappropriate_phrases,
            &mut self.tone_rules.dismissive_phrases,
            &mut self.tone_rules.cheerful_phrases,
        ] {
            lowercase_all(list);
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let lexicon = Self::from_json(&fs::read_to_string(path)?)?;
        info!(version = %lexicon.version, path = %path.display(), "loaded lexicon override");
        Ok(lexicon)
    }

    /// Load from `path` when given, otherwise fall back to the built-in lexicon.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_path(p),
            None => Self::builtin(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.emotions.is_empty() {
            return Err(invalid("no emotion categories declared"));
        }
        if self.themes.is_empty() {
            return Err(invalid("no theme categories declared"));
        }
        for (dim, categories) in [("emotion", &self.emotions), ("theme", &self.themes)] {
            for (name, keywords) in categories {
                if name.trim().is_empty() {
                    return Err(invalid(format!("blank {dim} category name")));
                }
                check_list(&format!("{dim} '{name}'"), keywords)?;
            }
        }
        for (source, related) in &self.emotion_relations {
            if !self.emotions.contains_key(source) {
                return Err(invalid(format!("relation source '{source}' is not a declared emotion")));
            }
            check_list(&format!("relations of '{source}'"), related)?;
        }
        check_list("positive_words", &self.positive_words)?;
        check_list("negative_words", &self.negative_words)?;
        check_list("action_words", &self.action_words)?;
        check_list("reflective_words", &self.reflective_words)?;
        check_list("stop_words", &self.stop_words)?;
        check_list("crisis_phrases", &self.crisis_phrases)?;
        check_list("tone_rules.serious_phrases", &self.tone_rules.serious_phrases)?;
        check_list("tone_rules.inappropriate_phrases", &self.tone_rules.inappropriate_phrases)?;
        check_list("tone_rules.dismissive_phrases", &self.tone_rules.dismissive_phrases)?;
        check_list("tone_rules.cheerful_phrases", &self.tone_rules.cheerful_phrases)?;
        Ok(())
    }

    pub fn related_emotions(&self, emotion: &str) -> &[String] {
        self.emotion_relations.get(emotion).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn invalid(msg: impl Into<String>) -> Error { Error::InvalidConfig(format!("lexicon: {}", msg.into())) }

fn lowercase_all(list: &mut [String]) {
    for word in list.iter_mut() {
        *word = word.trim().to_lowercase();
    }
}

/// A category map that rejects a name declared twice instead of keeping the last one.
fn unique_categories<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct UniqueCategories;

    impl<'de> Visitor<'de> for UniqueCategories {
        type Value = BTreeMap<String, Vec<String>>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of category name to word list")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut categories = BTreeMap::new();
            while let Some((name, words)) = map.next_entry::<String, Vec<String>>()? {
                if categories.contains_key(&name) {
                    return Err(de::Error::custom(format!("duplicate category '{name}'")));
                }
                categories.insert(name, words);
            }
            Ok(categories)
        }
    }

    deserializer.deserialize_map(UniqueCategories)
}

fn check_list(what: &str, list: &[String]) -> Result<()> {
    if list.is_empty() {
        return Err(invalid(format!("{what} is empty")));
    }
    if list.iter().any(|w| w.trim().is_empty()) {
        return Err(invalid(format!("{what} contains a blank entry")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lexicon_is_valid() {
        let lexicon = Lexicon::builtin().expect("builtin");
        assert_eq!(lexicon.emotions.len(), 19);
        assert_eq!(lexicon.themes.len(), 23);
        assert!(lexicon.emotions.contains_key("overwhelmed"));
        assert!(lexicon.themes.contains_key("health"));
        assert_eq!(lexicon.related_emotions("happy"), ["excited", "grateful", "joyful", "content"]);
        assert!(lexicon.related_emotions("angry").is_empty());
    }

    #[test]
    fn empty_keyword_list_is_rejected() {
        let mut lexicon = Lexicon::builtin().unwrap();
        lexicon.emotions.insert("numb".to_string(), vec![]);
        assert!(matches!(lexicon.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn undeclared_relation_source_is_rejected() {
        let mut lexicon = Lexicon::builtin().unwrap();
        lexicon.emotion_relations.insert("stressed".to_string(), vec!["tired".to_string()]);
        assert!(lexicon.validate().is_err());
    }

    #[test]
    fn normalize_lowercases_matched_lists() {
        let mut lexicon = Lexicon::builtin().unwrap();
        lexicon.positive_words.push(" Splendid ".to_string());
        lexicon.themes.insert("travel".to_string(), vec!["Voyage".to_string()]);
        lexicon.normalize();
        assert!(lexicon.positive_words.contains(&"splendid".to_string()));
        assert_eq!(lexicon.themes["travel"], ["voyage"]);
    }

    #[test]
    fn empty_tone_rule_is_rejected() {
        let mut lexicon = Lexicon::builtin().unwrap();
        lexicon.tone_rules.cheerful_phrases.clear();
        assert!(lexicon.validate().is_err());
    }
}
