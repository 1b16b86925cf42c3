//! JSON document processor
//!
//! Accepts the output of an external analyser serialized as JSON:
//!
//! ```json
//! {"sentences": [{"words": ["..."], "pos_tags": ["..."],
//!                 "stems": ["..."], "lemmas": ["..."]}]}
//! ```
//!
//! `stems` and `lemmas` are optional; missing arrays fall back to `words`.

use super::reader::TextProcessor;
use crate::errors::Result;
use crate::types::{Sentence, WordNormalization};
use serde::{Deserialize, Serialize};

/// One analysed sentence as serialized by the analyser
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSentence {
    pub words: Vec<String>,
    pub pos_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stems: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemmas: Option<Vec<String>>,
}

/// A whole analysed document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonDocument {
    pub sentences: Vec<JsonSentence>,
}

impl JsonSentence {
    fn into_sentence(self, normalization: WordNormalization) -> Result<Sentence> {
        let normalized = match normalization {
            WordNormalization::Stemming => self.stems,
            WordNormalization::Lemmatization => self.lemmas,
            WordNormalization::None => None,
        };
        let normalized = normalized.unwrap_or_else(|| self.words.clone());
        Sentence::new(self.words, self.pos_tags, normalized)
    }
}

/// Processor for JSON-serialized analyser output
#[derive(Debug, Clone, Default)]
pub struct JsonProcessor;

impl JsonProcessor {
    /// Create a JSON processor
    pub fn new() -> Self {
        Self
    }
}

impl TextProcessor for JsonProcessor {
    fn process(&self, text: &str, normalization: WordNormalization) -> Result<Vec<Sentence>> {
        let document: JsonDocument = serde_json::from_str(text)?;
        document
            .sentences
            .into_iter()
            .map(|s| s.into_sentence(normalization))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::KeyrankError;

    const DOC: &str = r#"{
        "sentences": [
            {"words": ["Ranking", "graphs"], "pos_tags": ["NOUN", "NOUN"],
             "stems": ["rank", "graph"], "lemmas": ["ranking", "graph"]},
            {"words": ["walks"], "pos_tags": ["NOUN"]}
        ]
    }"#;

    #[test]
    fn test_selects_normalization_array() {
        let p = JsonProcessor::new();

        let stems = p.process(DOC, WordNormalization::Stemming).unwrap();
        assert_eq!(stems[0].normalized_words, vec!["rank", "graph"]);

        let lemmas = p.process(DOC, WordNormalization::Lemmatization).unwrap();
        assert_eq!(lemmas[0].normalized_words, vec!["ranking", "graph"]);

        let surface = p.process(DOC, WordNormalization::None).unwrap();
        assert_eq!(surface[0].normalized_words, vec!["Ranking", "graphs"]);
    }

    #[test]
    fn test_missing_arrays_fall_back_to_words() {
        let sentences = JsonProcessor::new()
            .process(DOC, WordNormalization::Stemming)
            .unwrap();
        assert_eq!(sentences[1].normalized_words, vec!["walks"]);
    }

    #[test]
    fn test_ragged_sentence_rejected() {
        let doc = r#"{"sentences": [{"words": ["a", "b"], "pos_tags": ["NOUN"]}]}"#;
        let err = JsonProcessor::new()
            .process(doc, WordNormalization::None)
            .unwrap_err();
        assert!(matches!(err, KeyrankError::InvalidInput { .. }));
    }

    #[test]
    fn test_bad_json_is_serialization_error() {
        let err = JsonProcessor::new()
            .process("{", WordNormalization::None)
            .unwrap_err();
        assert!(matches!(err, KeyrankError::Serialization { .. }));
    }
}
