//! # Translation Services
//!
//! The pipeline sends each batch of source texts to a [`TranslationService`],
//! and expects exactly one translation per text, in order.

#[cfg(feature = "http")]
pub mod http_service;

#[cfg(feature = "http")]
pub use http_service::{HttpServiceOptions, HttpTranslationService};

use crate::errors::{NBResult, NmtBatchError};

/// The default source language tag.
pub const DEFAULT_SOURCE_LANG: &str = "ko";

/// The default target language tag.
pub const DEFAULT_TARGET_LANG: &str = "en";

/// The default translation model name.
pub const DEFAULT_MODEL_NAME: &str = "opus-mt";

/// A batch translation backend.
pub trait TranslationService {
    /// Translate a batch of texts.
    ///
    /// ## Arguments
    /// * `texts` - the source texts.
    /// * `source_lang` - the source language tag, e.g. `"ko"`.
    /// * `target_lang` - the target language tag, e.g. `"en"`.
    ///
    /// ## Returns
    /// One translation per input text, in input order.
    fn translate(
        &self,
        texts: &[String],
        source_lang: &str,
        target_lang: &str,
    ) -> NBResult<Vec<String>>;
}

impl<T: TranslationService + ?Sized> TranslationService for &T {
    fn translate(
        &self,
        texts: &[String],
        source_lang: &str,
        target_lang: &str,
    ) -> NBResult<Vec<String>> {
        (**self).translate(texts, source_lang, target_lang)
    }
}

impl<T: TranslationService + ?Sized> TranslationService for Box<T> {
    fn translate(
        &self,
        texts: &[String],
        source_lang: &str,
        target_lang: &str,
    ) -> NBResult<Vec<String>> {
        (**self).translate(texts, source_lang, target_lang)
    }
}

/// Check a service returned one translation per input.
pub fn check_translation_count(
    expected: usize,
    translations: &[String],
) -> NBResult<()> {
    if translations.len() != expected {
        return Err(NmtBatchError::LengthMismatch {
            expected,
            actual: translations.len(),
        });
    }
    Ok(())
}
