//! # Segment-Based ``{ pieces -> text }`` Decoder

use std::sync::Arc;

use tokenizers::{Decoder, Tokenizer};

use crate::{
    decoders::TextDecoder,
    errors::{NBResult, NmtBatchError},
    vocab::special_tokens::DEFAULT_UNK_TOKEN,
};

/// The `SentencePiece` word-boundary marker.
pub const SPIECE_UNDERLINE: char = '\u{2581}';

/// A unit-segment [`TextDecoder`].
///
/// Pieces are passed to the tokenizer's piece decoder when one is configured;
/// otherwise the `SentencePiece` rule is applied (concatenate, map `▁` to
/// a space, drop the leading space).
///
/// Unknown markers glued to adjacent text are re-spaced,
/// so `"안녕<UNK>"` decodes as `"안녕 <UNK>"` and `"<UNK>하세요"` as `" <UNK>하세요"`.
#[derive(Clone)]
pub struct SegmentDecoder {
    tokenizer: Option<Arc<Tokenizer>>,
    unknown_marker: String,
}

impl Default for SegmentDecoder {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SegmentDecoder {
    /// Creates a new decoder.
    ///
    /// ## Arguments
    /// * `tokenizer` - optional tokenizer whose piece decoder should be used.
    pub fn new(tokenizer: Option<Arc<Tokenizer>>) -> Self {
        Self {
            tokenizer,
            unknown_marker: DEFAULT_UNK_TOKEN.to_string(),
        }
    }

    /// Sets the unknown marker to re-space.
    pub fn with_unknown_marker<S: Into<String>>(
        mut self,
        marker: S,
    ) -> Self {
        self.unknown_marker = marker.into();
        self
    }

    /// Get the unknown marker.
    pub fn unknown_marker(&self) -> &str {
        &self.unknown_marker
    }
}

impl TextDecoder for SegmentDecoder {
    fn decode_tokens(
        &self,
        tokens: &[&str],
    ) -> NBResult<String> {
        let text = match self.tokenizer.as_ref().and_then(|t| t.get_decoder()) {
            Some(decoder) => decoder
                .decode(tokens.iter().map(|t| t.to_string()).collect())
                .map_err(|e| NmtBatchError::Tokenizer(e.to_string()))?,
            None => join_pieces(tokens),
        };

        Ok(space_unknown_markers(&text, &self.unknown_marker))
    }
}

/// Join `SentencePiece` pieces into text.
pub fn join_pieces(pieces: &[&str]) -> String {
    let text = pieces.concat().replace(SPIECE_UNDERLINE, " ");
    match text.strip_prefix(' ') {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

/// Insert a space before each `marker` glued to adjacent text.
///
/// A marker is spaced when non-whitespace text directly precedes it, or when it
/// starts the text and non-whitespace text directly follows it. A marker already
/// preceded by whitespace is left alone, so the rewrite is idempotent.
pub fn space_unknown_markers(
    text: &str,
    marker: &str,
) -> String {
    if marker.is_empty() || !text.contains(marker) {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + 8);
    let mut rest = text;
    while let Some(pos) = rest.find(marker) {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + marker.len()..];
        let glued = match out.chars().next_back() {
            Some(prev) => !prev.is_whitespace(),
            None => after.chars().next().is_some_and(|c| !c.is_whitespace()),
        };
        if glued {
            out.push(' ');
        }
        out.push_str(marker);
        rest = after;
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoders::testing::word_level_tokenizer;

    #[test]
    fn test_join_pieces() {
        assert_eq!(join_pieces(&["▁안녕", "하세요", "▁반갑", "습니다"]), "안녕하세요 반갑습니다");
        assert_eq!(join_pieces(&["abc", "▁d"]), "abc d");
        assert_eq!(join_pieces(&[]), "");
    }

    #[test]
    fn test_space_unknown_markers() {
        assert_eq!(space_unknown_markers("안녕<UNK>하세요", "<UNK>"), "안녕 <UNK>하세요");
        assert_eq!(space_unknown_markers("a<UNK><UNK>b", "<UNK>"), "a <UNK> <UNK>b");
        assert_eq!(space_unknown_markers("a <UNK> b", "<UNK>"), "a <UNK> b");
        assert_eq!(space_unknown_markers("<UNK>start", "<UNK>"), " <UNK>start");
        assert_eq!(space_unknown_markers("<UNK><UNK>", "<UNK>"), " <UNK> <UNK>");
        assert_eq!(space_unknown_markers("<UNK> start", "<UNK>"), "<UNK> start");
        assert_eq!(space_unknown_markers("<UNK>", "<UNK>"), "<UNK>");
    }

    #[test]
    fn test_space_unknown_markers_is_idempotent() {
        for text in ["plain text", "", "x<UNK>y<UNK>", "이미 <UNK> 띄움", "<UNK>하세요"] {
            let once = space_unknown_markers(text, "<UNK>");
            assert_eq!(space_unknown_markers(&once, "<UNK>"), once);
        }
        assert_eq!(space_unknown_markers("plain text", "<UNK>"), "plain text");
    }

    #[test]
    fn test_segment_decoder_native() {
        let decoder = SegmentDecoder::default();
        assert_eq!(
            decoder
                .decode_tokens(&["▁안녕", "<UNK>", "하세요", "▁반갑", "습니다"])
                .unwrap(),
            "안녕 <UNK>하세요 반갑습니다"
        );
    }

    #[test]
    fn test_segment_decoder_leading_marker() {
        let decoder = SegmentDecoder::default();
        assert_eq!(decoder.decode_tokens(&["<UNK>", "하세요"]).unwrap(), " <UNK>하세요");
    }

    #[test]
    fn test_segment_decoder_custom_marker() {
        let decoder = SegmentDecoder::default().with_unknown_marker("[UNK]");
        assert_eq!(decoder.unknown_marker(), "[UNK]");
        assert_eq!(
            decoder.decode_tokens(&["▁a", "[UNK]", "<UNK>"]).unwrap(),
            "a [UNK]<UNK>"
        );
    }

    #[test]
    fn test_segment_decoder_with_tokenizer_decoder() {
        let decoder = SegmentDecoder::new(Some(word_level_tokenizer(Some(r#"{"type": "Fuse"}"#))));
        assert_eq!(decoder.decode_tokens(&["ab", "<UNK>", "cd"]).unwrap(), "ab <UNK>cd");
    }

    #[test]
    fn test_segment_decoder_tokenizer_without_decoder_falls_back() {
        let decoder = SegmentDecoder::new(Some(word_level_tokenizer(None)));
        assert_eq!(decoder.decode_tokens(&["▁ab", "▁cd"]).unwrap(), "ab cd");
    }
}
