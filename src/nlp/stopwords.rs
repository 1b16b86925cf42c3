//! Stopwords and punctuation
//!
//! Stopword lists come from the `stop-words` crate. Punctuation handling
//! covers ASCII punctuation plus the Persian and Arabic marks that show up
//! as standalone tokens in tagged text.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

/// Characters treated as punctuation marks
pub const PUNCTUATION_MARKS: &[char] = &[
    '!', '"', '#', '$', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/', ':', ';', '<',
    '=', '>', '?', '@', '[', '\\', ']', '^', '_', '`', '{', '|', '}', '~', '،', '؛', '؟', '٪',
    '×', '«', '»', '…', '٫', '٬',
];

/// Check if a character is a punctuation mark
pub fn is_punctuation(c: char) -> bool {
    PUNCTUATION_MARKS.contains(&c)
}

/// Check if every character of a word is a punctuation mark
pub fn is_punctuation_only(word: &str) -> bool {
    word.chars().all(is_punctuation)
}

/// Check that a word holds only alphanumeric characters once the
/// whitespace-separated `valid_marks` are removed. Empty results fail.
///
/// Alphanumeric means the Unicode `Alphabetic` or `Numeric` property, not
/// the letter and digit categories alone: Arabic-script vowel marks (fatha,
/// kasra, shadda) pass, while the zero-width non-joiner does not.
pub fn is_alphanumeric(word: &str, valid_marks: &str) -> bool {
    let mut stripped = word.to_string();
    for mark in valid_marks.split_whitespace() {
        stripped = stripped.replace(mark, "");
    }
    !stripped.is_empty() && stripped.chars().all(char::is_alphanumeric)
}

/// A stopword set with optional case folding
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    stopwords: FxHashSet<String>,
    case_sensitive: bool,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::new("fa")
    }
}

impl StopwordFilter {
    /// Create a filter with the built-in list for a language code or name.
    /// Unknown languages give an empty list.
    pub fn new(language: &str) -> Self {
        Self {
            stopwords: Self::load_stopwords(language),
            case_sensitive: false,
        }
    }

    /// Create an empty stopword filter
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
            case_sensitive: false,
        }
    }

    /// Create a filter from a custom list
    pub fn from_list<S: AsRef<str>>(words: &[S]) -> Self {
        let mut filter = Self::empty();
        filter.add_stopwords(words);
        filter
    }

    /// Set case sensitivity
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Also treat every punctuation mark as a stopword
    pub fn with_punctuation(mut self) -> Self {
        self.stopwords
            .extend(PUNCTUATION_MARKS.iter().map(|c| c.to_string()));
        self
    }

    /// Add stopwords to the filter
    pub fn add_stopwords<S: AsRef<str>>(&mut self, words: &[S]) {
        for word in words {
            self.stopwords.insert(word.as_ref().to_lowercase());
        }
    }

    /// Check if a word is a stopword
    pub fn is_stopword(&self, word: &str) -> bool {
        if self.case_sensitive {
            self.stopwords.contains(word)
        } else {
            self.stopwords.contains(&word.to_lowercase())
        }
    }

    /// Number of stopwords in the filter
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Check if the filter is empty
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    fn load_stopwords(language: &str) -> FxHashSet<String> {
        let lang = match language.to_lowercase().as_str() {
            "fa" | "persian" | "farsi" => LANGUAGE::Persian,
            "ar" | "arabic" => LANGUAGE::Arabic,
            "ur" | "urdu" => LANGUAGE::Urdu,
            "en" | "english" => LANGUAGE::English,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "tr" | "turkish" => LANGUAGE::Turkish,
            "none" | "" => return FxHashSet::default(),
            other => {
                tracing::warn!(language = other, "no stopword list for language");
                return FxHashSet::default();
            }
        };

        get(lang).iter().map(|s| s.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persian_stopwords() {
        let filter = StopwordFilter::new("fa");
        assert!(filter.is_stopword("از"));
        assert!(filter.is_stopword("و"));
        assert!(!filter.is_stopword("پردازش"));
    }

    #[test]
    fn test_english_case_folding() {
        let filter = StopwordFilter::new("en");
        assert!(filter.is_stopword("The"));

        let strict = StopwordFilter::new("en").with_case_sensitive(true);
        assert!(!strict.is_stopword("The"));
    }

    #[test]
    fn test_custom_list_and_punctuation() {
        let filter = StopwordFilter::from_list(&["custom"]).with_punctuation();
        assert!(filter.is_stopword("custom"));
        assert!(filter.is_stopword("،"));
        assert!(filter.is_stopword("."));
        assert!(!filter.is_stopword("graph"));
    }

    #[test]
    fn test_unknown_language_is_empty() {
        assert!(StopwordFilter::new("klingon").is_empty());
    }

    #[test]
    fn test_punctuation_only() {
        assert!(is_punctuation_only("..."));
        assert!(is_punctuation_only("؟!"));
        assert!(!is_punctuation_only("a."));
    }

    #[test]
    fn test_is_alphanumeric() {
        assert!(is_alphanumeric("state-of-the-art", "-"));
        assert!(!is_alphanumeric("state-of-the-art", ""));
        assert!(is_alphanumeric("زبان", "-"));
        // zero-width non-joiner is neither a letter nor a digit
        assert!(!is_alphanumeric("زبان\u{200c}های", "-"));
        assert!(!is_alphanumeric("-", "-"));
        assert!(is_alphanumeric("c++", "+"));
    }

    #[test]
    fn test_vowel_marks_are_alphanumeric() {
        // kasra (U+0650) and shadda (U+0651) are combining marks
        assert!(is_alphanumeric("ک\u{0650}تاب", "-"));
        assert!(is_alphanumeric("م\u{0651}ه", "-"));
        assert!(is_alphanumeric("۱۴۰۲", "-"));
        assert!(!is_alphanumeric("\u{200c}", "-"));
    }
}
