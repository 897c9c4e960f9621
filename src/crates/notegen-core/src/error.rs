//! Error types for table loading, index decoding and token parsing

use std::path::PathBuf;

/// Failure while looking up model indices in a [`MappingTable`](crate::MappingTable)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Index {index} (position {position}) is not in the mapping table")]
    KeyNotFound { index: i64, position: usize },
}

/// Failure while turning a token into a note or chord
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid pitch identifier '{segment}' in chord token '{token}'")]
    InvalidPitchId { token: String, segment: String },

    #[error("Invalid note name '{token}'")]
    InvalidNoteName { token: String },
}

impl ParseError {
    pub fn invalid_pitch_id(token: impl Into<String>, segment: impl Into<String>) -> Self {
        ParseError::InvalidPitchId {
            token: token.into(),
            segment: segment.into(),
        }
    }

    pub fn invalid_note_name(token: impl Into<String>) -> Self {
        ParseError::InvalidNoteName {
            token: token.into(),
        }
    }

    /// The offending token
    pub fn token(&self) -> &str {
        match self {
            ParseError::InvalidPitchId { token, .. } => token,
            ParseError::InvalidNoteName { token } => token,
        }
    }
}

/// Failure while loading or saving a mapping table resource
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Failed to access table file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed table resource: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Table has {keys} keys but {values} values")]
    LengthMismatch { keys: usize, values: usize },

    #[error("Duplicate key {0} in table")]
    DuplicateKey(i64),
}
