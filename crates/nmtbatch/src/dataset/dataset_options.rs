//! Dataset Options
//!
//! Field naming and file format selection for [`PredictionDataset`](super::PredictionDataset).

use std::path::Path;

/// The default source-text field.
pub const DEFAULT_TEXT_FIELD: &str = "prediction";

/// The default token-index field.
pub const DEFAULT_INDICES_FIELD: &str = "prediction_indices";

/// Prediction file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// A single json array of entries.
    Json,

    /// One json entry per line.
    JsonLines,
}

impl DatasetFormat {
    /// Guess the format from a path extension.
    ///
    /// `.jsonl` and `.ndjson` are [`DatasetFormat::JsonLines`]; everything else is
    /// [`DatasetFormat::Json`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("jsonl") | Some("ndjson") => DatasetFormat::JsonLines,
            _ => DatasetFormat::Json,
        }
    }
}

/// Options for loading a [`PredictionDataset`](super::PredictionDataset).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetOptions {
    /// The source-text field of each entry.
    pub text_field: String,

    /// The token-index field, decoded when the text field is absent.
    pub indices_field: String,

    /// Additional string fields carried through to the results.
    pub extra_fields: Vec<String>,

    /// The file format; guessed from the path when `None`.
    pub format: Option<DatasetFormat>,
}

impl Default for DatasetOptions {
    fn default() -> Self {
        Self {
            text_field: DEFAULT_TEXT_FIELD.to_string(),
            indices_field: DEFAULT_INDICES_FIELD.to_string(),
            extra_fields: Vec::new(),
            format: None,
        }
    }
}

impl DatasetOptions {
    /// Sets the source-text field.
    pub fn with_text_field<S: Into<String>>(
        mut self,
        field: S,
    ) -> Self {
        self.text_field = field.into();
        self
    }

    /// Sets the token-index field.
    pub fn with_indices_field<S: Into<String>>(
        mut self,
        field: S,
    ) -> Self {
        self.indices_field = field.into();
        self
    }

    /// Sets the carried-through fields.
    pub fn with_extra_fields<W, S>(
        mut self,
        fields: W,
    ) -> Self
    where
        W: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the file format.
    pub fn with_format(
        mut self,
        format: Option<DatasetFormat>,
    ) -> Self {
        self.format = format;
        self
    }

    /// Resolve the file format for a path.
    pub fn format_for<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> DatasetFormat {
        self.format
            .unwrap_or_else(|| DatasetFormat::from_path(path))
    }
}
