//! # Index to Token Resolution

use crate::{
    errors::NBResult,
    vocab::{SequenceVocab, TokenIndex},
};

/// Resolve model output indices to token strings.
///
/// Resolution stops at the first end-of-sequence index; the end marker
/// and everything after it are dropped.
///
/// ## Arguments
/// * `indices` - the model output indices.
/// * `vocab` - the vocabulary the indices refer to.
///
/// ## Returns
/// The tokens before the end marker, or [`Lookup`](crate::NmtBatchError::Lookup)
/// if an index has no token.
pub fn indices_to_tokens<'v>(
    indices: &[TokenIndex],
    vocab: &'v SequenceVocab,
) -> NBResult<Vec<&'v str>> {
    let end = vocab.end_seq_index();
    indices
        .iter()
        .take_while(|&&idx| idx != end)
        .map(|&idx| vocab.lookup_index(idx))
        .collect()
}
