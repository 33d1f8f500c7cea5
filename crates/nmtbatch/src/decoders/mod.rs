//! # Prediction Decoders
//!
//! Model outputs are index sequences; decoding is two steps:
//!
//! * [`indices_to_tokens`] - resolve indices through a [`SequenceVocab`](crate::vocab::SequenceVocab),
//!   truncating at the end-of-sequence marker.
//! * [`TextDecoder`] - reassemble display text from the tokens.
//!
//! Two [`TextDecoder`] strategies exist, selected by [`DecodeStrategy`]:
//!
//! * [`MergeDecoder`] - sub-word merge decoding through tokenizer ids.
//! * [`SegmentDecoder`] - unit-segment decoding of the token strings.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use nmtbatch::decoders::{DecodeStrategy, DecoderOptions, SequenceDecoder};
//! use nmtbatch::vocab::SequenceVocab;
//!
//! let vocab = Arc::new(SequenceVocab::default().with_tokens(["▁hello", "▁world"]));
//! let end = vocab.end_seq_index();
//!
//! let decoder = SequenceDecoder::new(
//!     vocab,
//!     DecoderOptions::default()
//!         .with_strategy(DecodeStrategy::Segment)
//!         .build(None)
//!         .unwrap(),
//! );
//!
//! assert_eq!(decoder.decode_indices(&[4, 5, end, 4]).unwrap(), "hello world");
//! ```

pub mod decoder_options;
pub mod merge_decoder;
pub mod segment_decoder;
pub mod sequence_decoder;
pub mod text_decoder;
pub mod token_list;
pub mod tokenizer_loader;

#[cfg(test)]
pub(crate) mod testing;

pub use decoder_options::{DecodeStrategy, DecoderOptions};
pub use merge_decoder::MergeDecoder;
pub use segment_decoder::SegmentDecoder;
pub use sequence_decoder::SequenceDecoder;
pub use text_decoder::TextDecoder;
pub use token_list::indices_to_tokens;
pub use tokenizer_loader::{load_tokenizer, load_tokenizer_path};
