//! # Vocabulary IO
//!
//! Vocabularies are stored as the json object:
//! ```json
//! {
//!   "token_to_idx": {"<MASK>": 0, "<UNK>": 1, "<BEGIN>": 2, "<END>": 3, "▁the": 4},
//!   "mask_token": "<MASK>",
//!   "unk_token": "<UNK>",
//!   "begin_seq_token": "<BEGIN>",
//!   "end_seq_token": "<END>"
//! }
//! ```

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    errors::NBResult,
    vocab::{SequenceVocab, SpecialTokens, TokenIndex},
};

/// The serialized form of a [`SequenceVocab`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedVocab {
    /// The ``{ token -> index }`` map.
    pub token_to_idx: BTreeMap<String, TokenIndex>,

    /// The reserved tokens.
    #[serde(flatten)]
    pub specials: SpecialTokens,
}

impl From<&SequenceVocab> for SerializedVocab {
    fn from(vocab: &SequenceVocab) -> Self {
        Self {
            token_to_idx: vocab
                .iter()
                .map(|(index, token)| (token.to_string(), index))
                .collect(),
            specials: vocab.specials().clone(),
        }
    }
}

impl TryFrom<SerializedVocab> for SequenceVocab {
    type Error = crate::errors::NmtBatchError;

    fn try_from(value: SerializedVocab) -> Result<Self, Self::Error> {
        SequenceVocab::from_token_map(value.token_to_idx, value.specials)
    }
}

/// Load a [`SequenceVocab`] from a json vocab file.
///
/// # Arguments
/// * `path` - the path to the vocabulary file.
pub fn load_vocab_path<P: AsRef<Path>>(path: P) -> NBResult<SequenceVocab> {
    let reader = BufReader::new(File::open(path)?);
    read_vocab(reader)
}

/// Read a [`SequenceVocab`] from a json reader.
pub fn read_vocab<R: Read>(reader: R) -> NBResult<SequenceVocab> {
    let serialized: SerializedVocab = serde_json::from_reader(reader)?;
    serialized.try_into()
}

/// Save a [`SequenceVocab`] to a json vocab file.
///
/// # Arguments
/// * `vocab` - the vocabulary to save.
/// * `path` - the path to the vocabulary file.
pub fn save_vocab_path<P: AsRef<Path>>(
    vocab: &SequenceVocab,
    path: P,
) -> NBResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_vocab(vocab, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a [`SequenceVocab`] as json.
pub fn write_vocab<W: Write>(
    vocab: &SequenceVocab,
    writer: &mut W,
) -> NBResult<()> {
    serde_json::to_writer(writer, &SerializedVocab::from(vocab))?;
    Ok(())
}
