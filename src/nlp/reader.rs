//! Input loading and the text processor seam

use crate::errors::{KeyrankError, Result};
use crate::types::{Sentence, WordNormalization};
use std::path::Path;

/// Turns text into analysed sentences.
///
/// Implementations wrap a tokenizer, POS tagger and stemmer/lemmatizer.
/// Failures of the analyser itself should be reported as
/// [`KeyrankError::Preprocessing`].
pub trait TextProcessor: Send + Sync {
    /// Analyse `text`, filling normalized words according to `normalization`
    fn process(&self, text: &str, normalization: WordNormalization) -> Result<Vec<Sentence>>;
}

/// Resolve an input that is either raw text or a path to a text file.
///
/// An existing file is read and decoded as UTF-8; anything else is returned
/// unchanged as raw text.
pub fn read_input(input: &str) -> Result<String> {
    let path = Path::new(input);
    if !input.contains('\n') && path.is_file() {
        return read_file(path);
    }
    Ok(input.to_string())
}

/// Read a UTF-8 text file
pub fn read_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| KeyrankError::io(path, &e))?;
    String::from_utf8(bytes).map_err(|e| KeyrankError::decode(path, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("keyrank-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_raw_text_passes_through() {
        let text = "this is not a file/NOUN";
        assert_eq!(read_input(text).unwrap(), text);
    }

    #[test]
    fn test_existing_file_is_read() {
        let path = temp_path("read.txt");
        std::fs::write(&path, "متن/NOUN").unwrap();

        let loaded = read_input(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded, "متن/NOUN");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_file(temp_path("missing.txt")).unwrap_err();
        assert!(matches!(err, KeyrankError::Io { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_decode_error() {
        let path = temp_path("latin1.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[0x66, 0x6f, 0xff, 0xfe]).unwrap();
        drop(file);

        let err = read_input(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, KeyrankError::Decode { .. }));

        std::fs::remove_file(&path).ok();
    }
}
