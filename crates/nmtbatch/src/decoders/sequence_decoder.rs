//! # Index Sequence Decoder

use std::sync::Arc;

use crate::{
    decoders::{TextDecoder, indices_to_tokens},
    errors::NBResult,
    vocab::{SequenceVocab, TokenIndex},
};

/// Decodes model output index sequences into text.
///
/// Pairs a [`SequenceVocab`] with a configured [`TextDecoder`] strategy.
#[derive(Clone)]
pub struct SequenceDecoder {
    vocab: Arc<SequenceVocab>,
    decoder: Arc<dyn TextDecoder>,
}

impl SequenceDecoder {
    /// Creates a new decoder.
    pub fn new(
        vocab: Arc<SequenceVocab>,
        decoder: Arc<dyn TextDecoder>,
    ) -> Self {
        Self { vocab, decoder }
    }

    /// Get the vocabulary.
    pub fn vocab(&self) -> &SequenceVocab {
        &self.vocab
    }

    /// Decode one index sequence, stopping at the end-of-sequence marker.
    pub fn decode_indices(
        &self,
        indices: &[TokenIndex],
    ) -> NBResult<String> {
        let tokens = indices_to_tokens(indices, &self.vocab)?;
        self.decoder.decode_tokens(&tokens)
    }

    /// Decode a batch of index sequences.
    pub fn decode_batch<S: AsRef<[TokenIndex]>>(
        &self,
        batch: &[S],
    ) -> NBResult<Vec<String>> {
        batch
            .iter()
            .map(|indices| self.decode_indices(indices.as_ref()))
            .collect()
    }
}
