//! Tagged-text processor
//!
//! Reads text that an external tagger has already annotated: one sentence
//! per line, whitespace-separated tokens of the form `word/TAG` or
//! `word/TAG/normalized`.

use super::reader::TextProcessor;
use crate::errors::{KeyrankError, Result};
use crate::types::{Sentence, WordNormalization};

/// Processor for `word/TAG[/normalized]` lines
#[derive(Debug, Clone)]
pub struct TaggedTextProcessor {
    separator: char,
}

impl Default for TaggedTextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TaggedTextProcessor {
    /// Create a processor using `/` as the field separator
    pub fn new() -> Self {
        Self { separator: '/' }
    }

    /// Set the field separator
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Split a token from the right so the word itself may contain the
    /// separator. Three fields are read as `word/TAG/normalized` only when
    /// the middle one looks like a tag.
    fn parse_token<'a>(
        &self,
        token: &'a str,
        line_no: usize,
    ) -> Result<(&'a str, &'a str, Option<&'a str>)> {
        let malformed = || {
            KeyrankError::preprocessing(format!(
                "line {}: malformed token {:?}, expected word{sep}TAG[{sep}normalized]",
                line_no + 1,
                token,
                sep = self.separator
            ))
        };

        let mut fields = token.rsplitn(3, self.separator);
        if let (Some(norm), Some(tag), Some(word)) = (fields.next(), fields.next(), fields.next()) {
            if !word.is_empty() && looks_like_tag(tag) {
                return if norm.is_empty() {
                    Err(malformed())
                } else {
                    Ok((word, tag, Some(norm)))
                };
            }
        }

        match token.rsplit_once(self.separator) {
            Some((word, tag)) if !word.is_empty() && !tag.is_empty() => Ok((word, tag, None)),
            _ => Err(malformed()),
        }
    }
}

/// Upper-case tag names such as `NOUN`, `ADJ,EZ` or `NNP`
fn looks_like_tag(field: &str) -> bool {
    field.starts_with(|c: char| c.is_ascii_uppercase())
        && field
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, ',' | '_' | '-'))
}

impl TextProcessor for TaggedTextProcessor {
    fn process(&self, text: &str, normalization: WordNormalization) -> Result<Vec<Sentence>> {
        let mut sentences = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let mut words = Vec::new();
            let mut pos_tags = Vec::new();
            let mut normalized_words = Vec::new();

            for token in line.split_whitespace() {
                let (word, tag, norm) = self.parse_token(token, line_no)?;
                let normalized = match normalization {
                    WordNormalization::None => word,
                    WordNormalization::Stemming | WordNormalization::Lemmatization => {
                        norm.unwrap_or(word)
                    }
                };
                words.push(word.to_string());
                pos_tags.push(tag.to_string());
                normalized_words.push(normalized.to_string());
            }

            sentences.push(Sentence::new(words, pos_tags, normalized_words)?);
        }

        Ok(sentences)
    }
}
