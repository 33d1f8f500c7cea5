//! # Sequence Vocabulary

use std::collections::HashMap;

use crate::{
    errors::{NBResult, NmtBatchError},
    vocab::SpecialTokens,
};

/// Index type for vocabulary tokens.
pub type TokenIndex = usize;

/// A bijective ``{ token <-> index }`` vocabulary over `0..len`,
/// with reserved mask, unknown, begin and end-of-sequence tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceVocab {
    tokens: Vec<String>,
    token_to_index: HashMap<String, TokenIndex>,
    specials: SpecialTokens,

    mask_index: TokenIndex,
    unk_index: TokenIndex,
    begin_seq_index: TokenIndex,
    end_seq_index: TokenIndex,
}

impl Default for SequenceVocab {
    fn default() -> Self {
        Self::new(SpecialTokens::default())
    }
}

impl SequenceVocab {
    /// Create a vocabulary holding only the reserved tokens.
    pub fn new(specials: SpecialTokens) -> Self {
        let mut tokens = Vec::new();
        let mut token_to_index = HashMap::new();
        for token in specials.as_array() {
            if !token_to_index.contains_key(token) {
                token_to_index.insert(token.to_string(), tokens.len());
                tokens.push(token.to_string());
            }
        }
        Self::assemble(tokens, token_to_index, specials)
    }

    /// Build a vocabulary from an existing ``{ token -> index }`` map.
    ///
    /// Reserved tokens missing from the map are appended.
    ///
    /// ## Arguments
    /// * `token_to_index` - the token map; indices must cover `0..len` exactly once.
    /// * `specials` - the reserved token strings.
    ///
    /// ## Returns
    /// The vocabulary, or [`NmtBatchError::VocabConflict`] if the map is not a bijection
    /// onto a closed index range.
    pub fn from_token_map<I, S>(
        token_to_index: I,
        specials: SpecialTokens,
    ) -> NBResult<Self>
    where
        I: IntoIterator<Item = (S, TokenIndex)>,
        S: Into<String>,
    {
        let entries: Vec<(String, TokenIndex)> = token_to_index
            .into_iter()
            .map(|(token, index)| (token.into(), index))
            .collect();

        let mut slots: Vec<Option<String>> = vec![None; entries.len()];
        for (token, index) in entries {
            let Some(slot) = slots.get_mut(index) else {
                return Err(NmtBatchError::VocabConflict(format!(
                    "token {token:?} has index {index} outside a vocab of size {}",
                    slots.len()
                )));
            };
            if let Some(prev) = slot {
                return Err(NmtBatchError::VocabConflict(format!(
                    "tokens {prev:?} and {token:?} share index {index}"
                )));
            }
            *slot = Some(token);
        }

        // Every slot is filled: n entries, n slots, no collisions.
        let tokens: Vec<String> = slots.into_iter().flatten().collect();
        let mut token_to_index = HashMap::with_capacity(tokens.len() + 4);
        for (index, token) in tokens.iter().enumerate() {
            if let Some(prev) = token_to_index.insert(token.clone(), index) {
                return Err(NmtBatchError::VocabConflict(format!(
                    "token {token:?} has indices {prev} and {index}"
                )));
            }
        }

        let mut tokens = tokens;
        for token in specials.as_array() {
            if !token_to_index.contains_key(token) {
                token_to_index.insert(token.to_string(), tokens.len());
                tokens.push(token.to_string());
            }
        }

        Ok(Self::assemble(tokens, token_to_index, specials))
    }

    fn assemble(
        tokens: Vec<String>,
        token_to_index: HashMap<String, TokenIndex>,
        specials: SpecialTokens,
    ) -> Self {
        let index_of = |token: &str| token_to_index[token];
        Self {
            mask_index: index_of(&specials.mask_token),
            unk_index: index_of(&specials.unk_token),
            begin_seq_index: index_of(&specials.begin_seq_token),
            end_seq_index: index_of(&specials.end_seq_token),
            tokens,
            token_to_index,
            specials,
        }
    }

    /// Add a token, returning its index.
    ///
    /// Adding a token which is already present returns the existing index.
    pub fn add_token(
        &mut self,
        token: &str,
    ) -> TokenIndex {
        if let Some(&index) = self.token_to_index.get(token) {
            return index;
        }
        let index = self.tokens.len();
        self.tokens.push(token.to_string());
        self.token_to_index.insert(token.to_string(), index);
        index
    }

    /// Extend the vocabulary with the given tokens.
    pub fn with_tokens<W, S>(
        self,
        tokens: W,
    ) -> Self
    where
        W: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocab = self;
        for token in tokens {
            vocab.add_token(token.as_ref());
        }
        vocab
    }

    /// The number of tokens, including reserved tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Is the vocabulary empty?
    ///
    /// Always false: reserved tokens are always present.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The reserved token strings.
    pub fn specials(&self) -> &SpecialTokens {
        &self.specials
    }

    /// The mask (padding) index.
    pub fn mask_index(&self) -> TokenIndex {
        self.mask_index
    }

    /// The unknown-word index.
    pub fn unk_index(&self) -> TokenIndex {
        self.unk_index
    }

    /// The begin-of-sequence index.
    pub fn begin_seq_index(&self) -> TokenIndex {
        self.begin_seq_index
    }

    /// The end-of-sequence index.
    pub fn end_seq_index(&self) -> TokenIndex {
        self.end_seq_index
    }

    /// Look up the index of a token, if present.
    pub fn lookup_token(
        &self,
        token: &str,
    ) -> Option<TokenIndex> {
        self.token_to_index.get(token).copied()
    }

    /// Look up the index of a token, falling back to the unknown index.
    pub fn lookup_token_or_unk(
        &self,
        token: &str,
    ) -> TokenIndex {
        self.lookup_token(token).unwrap_or(self.unk_index)
    }

    /// Look up the token for an index.
    ///
    /// ## Returns
    /// The token, or [`NmtBatchError::Lookup`] if the index is out of range.
    pub fn lookup_index(
        &self,
        index: TokenIndex,
    ) -> NBResult<&str> {
        self.tokens
            .get(index)
            .map(String::as_str)
            .ok_or(NmtBatchError::Lookup {
                index,
                size: self.len(),
            })
    }

    /// Iterate over ``(index, token)`` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (TokenIndex, &str)> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(index, token)| (index, token.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_tokens_come_first() {
        let vocab = SequenceVocab::default();
        assert_eq!(vocab.len(), 4);
        assert_eq!(vocab.mask_index(), 0);
        assert_eq!(vocab.unk_index(), 1);
        assert_eq!(vocab.begin_seq_index(), 2);
        assert_eq!(vocab.end_seq_index(), 3);
        assert_eq!(vocab.lookup_index(3).unwrap(), "<END>");
    }

    #[test]
    fn test_add_and_lookup() {
        let mut vocab = SequenceVocab::default().with_tokens(["▁안녕", "하세요"]);
        assert_eq!(vocab.lookup_token("▁안녕"), Some(4));
        assert_eq!(vocab.add_token("하세요"), 5);
        assert_eq!(vocab.len(), 6);
        assert_eq!(vocab.lookup_token_or_unk("nope"), vocab.unk_index());

        assert!(matches!(
            vocab.lookup_index(6),
            Err(NmtBatchError::Lookup { index: 6, size: 6 })
        ));
    }

    #[test]
    fn test_from_token_map_appends_missing_specials() {
        let vocab = SequenceVocab::from_token_map(
            [("<END>", 0), ("a", 1), ("b", 2)],
            SpecialTokens::default(),
        )
        .unwrap();

        assert_eq!(vocab.end_seq_index(), 0);
        assert_eq!(vocab.lookup_index(2).unwrap(), "b");
        assert_eq!(vocab.mask_index(), 3);
        assert_eq!(vocab.unk_index(), 4);
        assert_eq!(vocab.begin_seq_index(), 5);
        assert_eq!(vocab.len(), 6);
    }

    #[test]
    fn test_from_token_map_rejects_non_bijection() {
        let gap = SequenceVocab::from_token_map([("a", 0), ("b", 2)], SpecialTokens::default());
        assert!(matches!(gap, Err(NmtBatchError::VocabConflict(_))));

        let dup = SequenceVocab::from_token_map([("a", 0), ("b", 0)], SpecialTokens::default());
        assert!(matches!(dup, Err(NmtBatchError::VocabConflict(_))));
    }
}
