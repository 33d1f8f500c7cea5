//! # Merge-Based ``{ token -> id -> text }`` Decoder

use std::sync::Arc;

use tokenizers::Tokenizer;

use crate::{
    decoders::TextDecoder,
    errors::{NBResult, NmtBatchError},
};

/// A sub-word merge [`TextDecoder`] backed by a [`Tokenizer`].
///
/// Tokens are mapped to tokenizer ids; tokens the tokenizer does not know
/// (including reserved sequence tokens) are dropped, not substituted.
#[derive(Clone)]
pub struct MergeDecoder {
    tokenizer: Arc<Tokenizer>,
    skip_special_tokens: bool,
}

impl MergeDecoder {
    /// Creates a new decoder.
    ///
    /// ## Arguments
    /// * `tokenizer` - the tokenizer providing ids and merge rules.
    pub fn new(tokenizer: Arc<Tokenizer>) -> Self {
        Self {
            tokenizer,
            skip_special_tokens: true,
        }
    }

    /// Sets whether tokenizer special tokens are skipped on decode.
    pub fn with_skip_special_tokens(
        mut self,
        skip_special_tokens: bool,
    ) -> Self {
        self.skip_special_tokens = skip_special_tokens;
        self
    }

    /// Map token strings to tokenizer ids, dropping unmapped tokens.
    pub fn token_ids(
        &self,
        tokens: &[&str],
    ) -> Vec<u32> {
        tokens
            .iter()
            .filter_map(|token| self.tokenizer.token_to_id(token))
            .collect()
    }
}

impl TextDecoder for MergeDecoder {
    fn decode_tokens(
        &self,
        tokens: &[&str],
    ) -> NBResult<String> {
        let ids = self.token_ids(tokens);
        log::trace!("merge decode: {} of {} tokens mapped", ids.len(), tokens.len());

        self.tokenizer
            .decode(&ids, self.skip_special_tokens)
            .map_err(|e| NmtBatchError::Tokenizer(e.to_string()))
    }
}
