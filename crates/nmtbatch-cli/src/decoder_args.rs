use std::sync::Arc;

use nmtbatch::{
    decoders::{DecodeStrategy, DecoderOptions, SequenceDecoder, load_tokenizer},
    vocab::{load_vocab_path, special_tokens::DEFAULT_UNK_TOKEN},
};

/// Index decoding arg group.
#[derive(clap::Args, Debug)]
pub struct DecoderArgs {
    /// Sequence vocabulary json; enables decoding of index-only predictions.
    #[arg(long, default_value = None)]
    vocab: Option<String>,

    /// Tokenizer file, or hub model name.
    #[arg(long, default_value = None)]
    tokenizer: Option<String>,

    /// Token reassembly strategy: "merge" (bpe) or "segment" (sentencepiece).
    #[arg(long, default_value = "merge")]
    decode_strategy: DecodeStrategy,

    /// Unknown-token marker re-spaced by segment decoding.
    #[arg(long, default_value = DEFAULT_UNK_TOKEN)]
    unknown_marker: String,
}

impl DecoderArgs {
    /// Build the sequence decoder, if a vocabulary is configured.
    pub fn build_decoder(&self) -> Result<Option<Arc<SequenceDecoder>>, Box<dyn std::error::Error>> {
        let Some(vocab_path) = &self.vocab else {
            return Ok(None);
        };

        log::info!("vocab: {vocab_path}");
        let vocab = Arc::new(load_vocab_path(vocab_path)?);

        let tokenizer = match &self.tokenizer {
            Some(name) => {
                log::info!("tokenizer: {name}");
                Some(load_tokenizer(name)?)
            }
            None => None,
        };

        let decoder = DecoderOptions::default()
            .with_strategy(self.decode_strategy)
            .with_unknown_marker(self.unknown_marker.clone())
            .build(tokenizer)?;

        Ok(Some(Arc::new(SequenceDecoder::new(vocab, decoder))))
    }
}
