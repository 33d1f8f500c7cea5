//! # Error Types

use std::path::PathBuf;

/// Errors from nmtbatch operations.
#[derive(Debug, thiserror::Error)]
pub enum NmtBatchError {
    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Parse error (json, vocab files, device strings, etc.)
    #[error("parse error: {0}")]
    Parse(String),

    /// A token index has no entry in the vocabulary.
    #[error("token index {index} not in vocabulary (size {size})")]
    Lookup {
        /// The index that failed to resolve.
        index: usize,

        /// The vocabulary size.
        size: usize,
    },

    /// Vocabulary data is inconsistent.
    #[error("{0}")]
    VocabConflict(String),

    /// A prediction record is missing a required field.
    #[error("record {position}: missing string field {field:?}")]
    MissingField {
        /// The position of the record in the input.
        position: usize,

        /// The missing field name.
        field: String,
    },

    /// Batch size must be positive.
    #[error("batch size must be > 0")]
    InvalidBatchSize,

    /// The output file already exists; results are never overwritten.
    #[error("output path already exists: {}", path.display())]
    OutputExists {
        /// The colliding output path.
        path: PathBuf,
    },

    /// Error from a tokenizer backend.
    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    /// Error from the translation service.
    #[error("translation error: {0}")]
    Translation(String),

    /// The translation service returned the wrong number of results.
    #[error("translation returned {actual} results for {expected} inputs")]
    LengthMismatch {
        /// The number of inputs sent.
        expected: usize,

        /// The number of results received.
        actual: usize,
    },
}

impl From<serde_json::Error> for NmtBatchError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            NmtBatchError::Io(err.into())
        } else {
            NmtBatchError::Parse(err.to_string())
        }
    }
}

/// Result type for nmtbatch operations.
pub type NBResult<T> = core::result::Result<T, NmtBatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_errors_split_io_and_parse() {
        let err: NmtBatchError = serde_json::from_str::<Vec<String>>("[1,").unwrap_err().into();
        assert!(matches!(err, NmtBatchError::Parse(_)));

        let err = NmtBatchError::OutputExists {
            path: PathBuf::from("out/results.json"),
        };
        assert_eq!(
            err.to_string(),
            "output path already exists: out/results.json"
        );
    }
}
