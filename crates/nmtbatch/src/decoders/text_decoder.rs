//! # Text Decoder Trait

use crate::errors::NBResult;

/// Trait for token-string decoders.
///
/// Implementations reassemble display text from tokenizer pieces.
pub trait TextDecoder: Send + Sync {
    /// Decodes token strings into text.
    ///
    /// ## Arguments
    /// * `tokens` - the token strings, in order.
    ///
    /// ## Returns
    /// A `NBResult<String>`.
    fn decode_tokens(
        &self,
        tokens: &[&str],
    ) -> NBResult<String>;

    /// Decodes a batch of token sequences.
    fn decode_token_batch(
        &self,
        batch: &[Vec<&str>],
    ) -> NBResult<Vec<String>> {
        batch
            .iter()
            .map(|tokens| self.decode_tokens(tokens))
            .collect()
    }
}
