//! # Sequence Vocabularies
//!
//! A [`SequenceVocab`] maps model output indices back to token strings.
//!
//! ## Example
//!
//! ```rust
//! use nmtbatch::vocab::SequenceVocab;
//!
//! let vocab = SequenceVocab::default().with_tokens(["▁hello", "▁world"]);
//! assert_eq!(vocab.lookup_index(4).unwrap(), "▁hello");
//! assert_eq!(vocab.lookup_index(vocab.end_seq_index()).unwrap(), "<END>");
//! ```

pub mod io;
pub mod sequence_vocab;
pub mod special_tokens;

pub use io::{load_vocab_path, read_vocab, save_vocab_path, write_vocab};
pub use sequence_vocab::{SequenceVocab, TokenIndex};
pub use special_tokens::SpecialTokens;
