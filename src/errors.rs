//! Error types for keyrank
//!
//! Input problems (unreadable or undecodable text, malformed sentences) and
//! configuration problems are errors. Insufficient data (too few candidates,
//! an empty graph, a walk that did not converge) is not: those are reported
//! through `tracing` and the run completes with a best-effort result.

use std::path::Path;
use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, KeyrankError>;

/// Main error type for keyrank
#[derive(Error, Debug, Clone)]
pub enum KeyrankError {
    /// The input file could not be read
    #[error("Cannot read {path}: {message}")]
    Io { path: String, message: String },

    /// The input is not valid UTF-8 text
    #[error("Cannot decode {path} as UTF-8: {message}")]
    Decode { path: String, message: String },

    /// Input data violates a structural invariant
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// The text processor collaborator failed
    #[error("Preprocessing failed: {message}")]
    Preprocessing { message: String },

    /// Configuration validation failed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A chunk grammar could not be compiled
    #[error("Invalid grammar: {message}")]
    InvalidGrammar { message: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl KeyrankError {
    /// Create an I/O error for the given path
    pub fn io(path: impl AsRef<Path>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }

    /// Create a decode error for the given path
    pub fn decode(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.as_ref().display().to_string(),
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a preprocessing error
    pub fn preprocessing(message: impl Into<String>) -> Self {
        Self::Preprocessing {
            message: message.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid grammar error
    pub fn invalid_grammar(message: impl Into<String>) -> Self {
        Self::InvalidGrammar {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Check if this error came from reading the input
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Io { .. } | Self::Decode { .. } | Self::InvalidInput { .. }
        )
    }
}

impl From<serde_json::Error> for KeyrankError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
