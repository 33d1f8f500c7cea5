//! # Reserved Sequence Tokens

use serde::{Deserialize, Serialize};

/// The default mask (padding) token.
pub const DEFAULT_MASK_TOKEN: &str = "<MASK>";

/// The default unknown-word token.
pub const DEFAULT_UNK_TOKEN: &str = "<UNK>";

/// The default begin-of-sequence token.
pub const DEFAULT_BEGIN_SEQ_TOKEN: &str = "<BEGIN>";

/// The default end-of-sequence token.
pub const DEFAULT_END_SEQ_TOKEN: &str = "<END>";

/// The reserved token strings of a [`SequenceVocab`](super::SequenceVocab).
///
/// Reserved tokens are assigned indices in declaration order
/// when they are missing from a vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialTokens {
    /// Mask (padding) token.
    #[serde(default = "default_mask_token")]
    pub mask_token: String,

    /// Unknown-word token.
    #[serde(default = "default_unk_token")]
    pub unk_token: String,

    /// Begin-of-sequence token.
    #[serde(default = "default_begin_seq_token")]
    pub begin_seq_token: String,

    /// End-of-sequence token.
    #[serde(default = "default_end_seq_token")]
    pub end_seq_token: String,
}

fn default_mask_token() -> String {
    DEFAULT_MASK_TOKEN.to_string()
}

fn default_unk_token() -> String {
    DEFAULT_UNK_TOKEN.to_string()
}

fn default_begin_seq_token() -> String {
    DEFAULT_BEGIN_SEQ_TOKEN.to_string()
}

fn default_end_seq_token() -> String {
    DEFAULT_END_SEQ_TOKEN.to_string()
}

impl Default for SpecialTokens {
    fn default() -> Self {
        Self {
            mask_token: default_mask_token(),
            unk_token: default_unk_token(),
            begin_seq_token: default_begin_seq_token(),
            end_seq_token: default_end_seq_token(),
        }
    }
}

impl SpecialTokens {
    /// Set the unknown-word token.
    pub fn with_unk_token<S: Into<String>>(
        mut self,
        token: S,
    ) -> Self {
        self.unk_token = token.into();
        self
    }

    /// Set the end-of-sequence token.
    pub fn with_end_seq_token<S: Into<String>>(
        mut self,
        token: S,
    ) -> Self {
        self.end_seq_token = token.into();
        self
    }

    /// The reserved tokens, in index-assignment order.
    pub fn as_array(&self) -> [&str; 4] {
        [
            &self.mask_token,
            &self.unk_token,
            &self.begin_seq_token,
            &self.end_seq_token,
        ]
    }
}
