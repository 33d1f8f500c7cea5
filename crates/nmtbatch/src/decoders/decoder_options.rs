//! Text Decoder Options
//!
//! Options for building a [`TextDecoder`].

use std::{str::FromStr, sync::Arc};

use tokenizers::Tokenizer;

use crate::{
    decoders::{MergeDecoder, SegmentDecoder, TextDecoder},
    errors::{NBResult, NmtBatchError},
    vocab::special_tokens::DEFAULT_UNK_TOKEN,
};

/// Selects the token reassembly strategy.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStrategy {
    /// Sub-word merge decoding through tokenizer ids.
    ///
    /// See: [`MergeDecoder`]
    #[default]
    Merge,

    /// Unit-segment decoding of the token strings.
    ///
    /// See: [`SegmentDecoder`]
    Segment,
}

impl DecodeStrategy {
    /// The strategy name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::Segment => "segment",
        }
    }
}

impl core::fmt::Display for DecodeStrategy {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DecodeStrategy {
    type Err = NmtBatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "merge" | "bpe" => Ok(Self::Merge),
            "segment" | "sp" | "sentencepiece" => Ok(Self::Segment),
            _ => Err(NmtBatchError::Parse(format!("unknown decode strategy: {s:?}"))),
        }
    }
}

/// Options for configuring a [`TextDecoder`].
#[derive(Debug, Clone, PartialEq)]
pub struct DecoderOptions {
    /// The decode strategy.
    pub strategy: DecodeStrategy,

    /// The unknown marker re-spaced by segment decoding.
    pub unknown_marker: String,

    /// Skip tokenizer special tokens in merge decoding.
    pub skip_special_tokens: bool,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            strategy: DecodeStrategy::default(),
            unknown_marker: DEFAULT_UNK_TOKEN.to_string(),
            skip_special_tokens: true,
        }
    }
}

impl DecoderOptions {
    /// Gets the configured strategy.
    pub fn strategy(&self) -> DecodeStrategy {
        self.strategy
    }

    /// Sets the configured strategy.
    pub fn with_strategy(
        mut self,
        strategy: DecodeStrategy,
    ) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the unknown marker.
    pub fn with_unknown_marker<S: Into<String>>(
        mut self,
        marker: S,
    ) -> Self {
        self.unknown_marker = marker.into();
        self
    }

    /// Sets whether merge decoding skips tokenizer special tokens.
    pub fn with_skip_special_tokens(
        mut self,
        skip_special_tokens: bool,
    ) -> Self {
        self.skip_special_tokens = skip_special_tokens;
        self
    }

    /// Build a [`TextDecoder`] for the configured strategy.
    ///
    /// ## Arguments
    /// * `tokenizer` - the tokenizer; required by [`DecodeStrategy::Merge`].
    pub fn build(
        &self,
        tokenizer: Option<Arc<Tokenizer>>,
    ) -> NBResult<Arc<dyn TextDecoder>> {
        let decoder: Arc<dyn TextDecoder> = match self.strategy {
            DecodeStrategy::Merge => {
                let tokenizer = tokenizer.ok_or_else(|| {
                    NmtBatchError::Tokenizer("merge decoding requires a tokenizer".to_string())
                })?;
                Arc::new(
                    MergeDecoder::new(tokenizer)
                        .with_skip_special_tokens(self.skip_special_tokens),
                )
            }
            DecodeStrategy::Segment => Arc::new(
                SegmentDecoder::new(tokenizer).with_unknown_marker(self.unknown_marker.clone()),
            ),
        };
        Ok(decoder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoders::testing::word_level_tokenizer;

    #[test]
    fn test_strategy_parse() {
        assert_eq!("merge".parse::<DecodeStrategy>().unwrap(), DecodeStrategy::Merge);
        assert_eq!("BPE".parse::<DecodeStrategy>().unwrap(), DecodeStrategy::Merge);
        assert_eq!("sp".parse::<DecodeStrategy>().unwrap(), DecodeStrategy::Segment);
        assert!("jamo".parse::<DecodeStrategy>().is_err());
        assert_eq!(DecodeStrategy::Segment.to_string(), "segment");
    }

    #[test]
    fn test_build_selects_strategy() {
        let tokens = ["ab", "<UNK>", "cd"];

        let merge = DecoderOptions::default()
            .build(Some(word_level_tokenizer(None)))
            .unwrap();
        assert_eq!(merge.decode_tokens(&tokens).unwrap(), "ab cd");

        let segment = DecoderOptions::default()
            .with_strategy(DecodeStrategy::Segment)
            .build(None)
            .unwrap();
        assert_eq!(segment.decode_tokens(&tokens).unwrap(), "ab <UNK>cd");
    }

    #[test]
    fn test_merge_requires_tokenizer() {
        assert!(matches!(
            DecoderOptions::default().build(None),
            Err(NmtBatchError::Tokenizer(_))
        ));
    }
}
