//! Pipeline Options

use std::path::{Path, PathBuf};

use crate::{
    batching::DEFAULT_BATCH_SIZE,
    dataset::DatasetOptions,
    runtime::RuntimeConfig,
    translate::{DEFAULT_SOURCE_LANG, DEFAULT_TARGET_LANG},
};

/// The default result field for source texts.
pub const DEFAULT_SOURCE_FIELD: &str = "prediction_source";

/// The default result field for translations.
pub const DEFAULT_TARGET_FIELD: &str = "prediction_target";

/// Options for a [`TranslationPipeline`](super::TranslationPipeline).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// The predictions file.
    pub input_path: PathBuf,

    /// The results file; must not exist.
    pub output_path: PathBuf,

    /// Records per translation call.
    pub batch_size: usize,

    /// The source language tag.
    pub source_lang: String,

    /// The target language tag.
    pub target_lang: String,

    /// The result field for source texts.
    pub source_field: String,

    /// The result field for translations.
    pub target_field: String,

    /// Display a progress bar.
    pub show_progress: bool,

    /// Dataset loading options.
    pub dataset: DatasetOptions,

    /// Device and seed configuration.
    pub runtime: RuntimeConfig,
}

impl PipelineOptions {
    /// Create options with defaults for everything but the paths.
    pub fn new<I: AsRef<Path>, O: AsRef<Path>>(
        input_path: I,
        output_path: O,
    ) -> Self {
        Self {
            input_path: input_path.as_ref().to_path_buf(),
            output_path: output_path.as_ref().to_path_buf(),
            batch_size: DEFAULT_BATCH_SIZE,
            source_lang: DEFAULT_SOURCE_LANG.to_string(),
            target_lang: DEFAULT_TARGET_LANG.to_string(),
            source_field: DEFAULT_SOURCE_FIELD.to_string(),
            target_field: DEFAULT_TARGET_FIELD.to_string(),
            show_progress: false,
            dataset: DatasetOptions::default(),
            runtime: RuntimeConfig::default(),
        }
    }

    /// Sets the batch size.
    pub fn with_batch_size(
        mut self,
        batch_size: usize,
    ) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Sets the source and target language tags.
    pub fn with_languages<S: Into<String>, T: Into<String>>(
        mut self,
        source_lang: S,
        target_lang: T,
    ) -> Self {
        self.source_lang = source_lang.into();
        self.target_lang = target_lang.into();
        self
    }

    /// Sets the result field names.
    pub fn with_result_fields<S: Into<String>, T: Into<String>>(
        mut self,
        source_field: S,
        target_field: T,
    ) -> Self {
        self.source_field = source_field.into();
        self.target_field = target_field.into();
        self
    }

    /// Sets the progress bar flag.
    pub fn with_show_progress(
        mut self,
        show_progress: bool,
    ) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Sets the dataset options.
    pub fn with_dataset(
        mut self,
        dataset: DatasetOptions,
    ) -> Self {
        self.dataset = dataset;
        self
    }

    /// Sets the runtime configuration.
    pub fn with_runtime(
        mut self,
        runtime: RuntimeConfig,
    ) -> Self {
        self.runtime = runtime;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = PipelineOptions::new("prediction.json", "out/results.json");
        assert_eq!(options.batch_size, 32);
        assert_eq!(options.source_lang, "ko");
        assert_eq!(options.target_lang, "en");
        assert_eq!(options.source_field, "prediction_source");
        assert_eq!(options.target_field, "prediction_target");

        let options = options
            .with_languages("ja", "de")
            .with_result_fields("src", "tgt")
            .with_batch_size(4);
        assert_eq!((options.source_lang.as_str(), options.target_field.as_str()), ("ja", "tgt"));
        assert_eq!(options.batch_size, 4);
    }
}
