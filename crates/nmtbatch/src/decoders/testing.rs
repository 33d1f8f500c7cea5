//! # Decoder Test Utilities

use std::{str::FromStr, sync::Arc};

use tokenizers::Tokenizer;

/// Build a small word-level [`Tokenizer`] over ``["[UNK]", "hello", "world", "ab", "cd"]``.
///
/// ## Arguments
/// * `decoder` - optional decoder json, e.g. ``{"type": "Fuse"}``.
pub fn word_level_tokenizer(decoder: Option<&str>) -> Arc<Tokenizer> {
    let json = format!(
        r#"{{
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [],
            "normalizer": null,
            "pre_tokenizer": null,
            "post_processor": null,
            "decoder": {},
            "model": {{
                "type": "WordLevel",
                "vocab": {{"[UNK]": 0, "hello": 1, "world": 2, "ab": 3, "cd": 4}},
                "unk_token": "[UNK]"
            }}
        }}"#,
        decoder.unwrap_or("null")
    );

    Arc::new(Tokenizer::from_str(&json).unwrap())
}
