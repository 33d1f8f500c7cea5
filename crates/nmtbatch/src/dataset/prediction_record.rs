//! # Prediction Records

use std::collections::BTreeMap;

use serde_json::Value;

use crate::{
    dataset::DatasetOptions,
    decoders::SequenceDecoder,
    errors::{NBResult, NmtBatchError},
    vocab::TokenIndex,
};

/// One source-language prediction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRecord {
    position: usize,
    text: String,
    indices: Option<Vec<TokenIndex>>,
    extra: BTreeMap<String, String>,
}

impl PredictionRecord {
    /// Create a text-only record.
    pub fn new<S: Into<String>>(
        position: usize,
        text: S,
    ) -> Self {
        Self {
            position,
            text: text.into(),
            indices: None,
            extra: BTreeMap::new(),
        }
    }

    /// Attach a token-index encoding.
    pub fn with_indices(
        mut self,
        indices: Vec<TokenIndex>,
    ) -> Self {
        self.indices = Some(indices);
        self
    }

    /// Attach a carried-through field.
    pub fn with_extra<K: Into<String>, V: Into<String>>(
        mut self,
        field: K,
        value: V,
    ) -> Self {
        self.extra.insert(field.into(), value.into());
        self
    }

    /// Parse a record from a json entry.
    ///
    /// Entries are either bare strings, or objects holding the configured text field.
    /// When the text field is absent and a `decoder` is given, the text is decoded
    /// from the indices field.
    ///
    /// ## Arguments
    /// * `position` - the entry position in the input.
    /// * `value` - the json entry.
    /// * `options` - the field configuration.
    /// * `decoder` - optional decoder for index-only entries.
    pub fn from_value(
        position: usize,
        value: Value,
        options: &DatasetOptions,
        decoder: Option<&SequenceDecoder>,
    ) -> NBResult<Self> {
        let missing = |field: &str| NmtBatchError::MissingField {
            position,
            field: field.to_string(),
        };

        let mut object = match value {
            Value::String(text) if options.extra_fields.is_empty() => {
                return Ok(Self::new(position, text));
            }
            Value::Object(object) => object,
            Value::String(_) => {
                let field = options.extra_fields.first().unwrap_or(&options.text_field);
                return Err(missing(field));
            }
            _ => return Err(missing(&options.text_field)),
        };

        let indices = match object.remove(&options.indices_field) {
            None | Some(Value::Null) => None,
            Some(value) => Some(serde_json::from_value::<Vec<TokenIndex>>(value).map_err(
                |e| {
                    NmtBatchError::Parse(format!(
                        "record {position}: field {:?}: {e}",
                        options.indices_field
                    ))
                },
            )?),
        };

        let text = match (object.remove(&options.text_field), &indices, decoder) {
            (Some(Value::String(text)), _, _) => text,
            (None | Some(Value::Null), Some(indices), Some(decoder)) => {
                decoder.decode_indices(indices)?
            }
            _ => return Err(missing(&options.text_field)),
        };

        let mut extra = BTreeMap::new();
        for field in &options.extra_fields {
            match object.remove(field) {
                Some(Value::String(value)) => {
                    extra.insert(field.clone(), value);
                }
                _ => return Err(missing(field)),
            }
        }

        Ok(Self {
            position,
            text,
            indices,
            extra,
        })
    }

    /// The position of this record in the input.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The source-language text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The token-index encoding, if present.
    pub fn indices(&self) -> Option<&[TokenIndex]> {
        self.indices.as_deref()
    }

    /// Get a carried-through field.
    pub fn extra(
        &self,
        field: &str,
    ) -> Option<&str> {
        self.extra.get(field).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::{
        decoders::{DecodeStrategy, DecoderOptions},
        vocab::SequenceVocab,
    };

    #[test]
    fn test_from_object_and_string() {
        let options = DatasetOptions::default();

        let record = PredictionRecord::from_value(
            0,
            json!({"prediction": "안녕하세요", "prediction_indices": [4, 5, 3]}),
            &options,
            None,
        )
        .unwrap();
        assert_eq!(record.text(), "안녕하세요");
        assert_eq!(record.indices(), Some(&[4, 5, 3][..]));

        let record = PredictionRecord::from_value(1, json!("bare"), &options, None).unwrap();
        assert_eq!(record.position(), 1);
        assert_eq!(record.text(), "bare");
        assert_eq!(record.indices(), None);
    }

    #[test]
    fn test_missing_text() {
        let options = DatasetOptions::default();
        for value in [json!({"source": "x"}), json!(3), json!({"prediction": 7})] {
            assert!(matches!(
                PredictionRecord::from_value(2, value, &options, None),
                Err(NmtBatchError::MissingField { position: 2, .. })
            ));
        }
    }

    #[test]
    fn test_decode_from_indices() {
        let vocab = Arc::new(SequenceVocab::default().with_tokens(["▁좋은", "▁아침"]));
        let decoder = SequenceDecoder::new(
            vocab,
            DecoderOptions::default()
                .with_strategy(DecodeStrategy::Segment)
                .build(None)
                .unwrap(),
        );

        let record = PredictionRecord::from_value(
            0,
            json!({"prediction_indices": [4, 5, 3, 0, 0]}),
            &DatasetOptions::default(),
            Some(&decoder),
        )
        .unwrap();
        assert_eq!(record.text(), "좋은 아침");
    }

    #[test]
    fn test_extra_fields() {
        let options = DatasetOptions::default().with_extra_fields(["source"]);

        let record = PredictionRecord::from_value(
            0,
            json!({"prediction": "p", "source": "s", "other": 1}),
            &options,
            None,
        )
        .unwrap();
        assert_eq!(record.extra("source"), Some("s"));
        assert_eq!(record.extra("other"), None);

        assert!(PredictionRecord::from_value(1, json!("p"), &options, None).is_err());
        assert_eq!(
            PredictionRecord::new(0, "p").with_extra("source", "s"),
            record
        );
    }
}
