//! # Prediction Dataset

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use serde_json::Value;

use crate::{
    batching::BatchOptions,
    dataset::{DatasetFormat, DatasetOptions, PredictionRecord},
    decoders::SequenceDecoder,
    errors::{NBResult, NmtBatchError},
};

/// An ordered, immutable collection of [`PredictionRecord`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionDataset {
    options: DatasetOptions,
    records: Vec<PredictionRecord>,
}

/// Load a dataset from a predictions file with default options.
///
/// See [`load_dataset_with`].
pub fn load_dataset<P: AsRef<Path>>(path: P) -> NBResult<PredictionDataset> {
    load_dataset_with(path, &DatasetOptions::default(), None)
}

/// Load a dataset from a predictions file.
///
/// ## Arguments
/// * `path` - the predictions file; a json array, or json lines.
/// * `options` - field and format configuration.
/// * `decoder` - optional decoder for entries which only carry indices.
///
/// ## Returns
/// The loaded dataset, or the first `Io`, `Parse`, or `MissingField` error.
pub fn load_dataset_with<P: AsRef<Path>>(
    path: P,
    options: &DatasetOptions,
    decoder: Option<&SequenceDecoder>,
) -> NBResult<PredictionDataset> {
    let path = path.as_ref();
    let format = options.format_for(path);
    log::debug!("loading {format:?} dataset: {}", path.display());

    let reader = BufReader::new(File::open(path)?);
    let dataset = read_dataset(reader, format, options, decoder)?;

    log::info!(
        "loaded {} records from {}",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

/// Read a dataset from a reader.
///
/// ## Arguments
/// * `reader` - the json source.
/// * `format` - how the source is laid out.
/// * `options` - field configuration.
/// * `decoder` - optional decoder for entries which only carry indices.
pub fn read_dataset<R: BufRead>(
    reader: R,
    format: DatasetFormat,
    options: &DatasetOptions,
    decoder: Option<&SequenceDecoder>,
) -> NBResult<PredictionDataset> {
    let values: Vec<Value> = match format {
        DatasetFormat::Json => match serde_json::from_reader(reader)? {
            Value::Array(values) => values,
            other => {
                return Err(NmtBatchError::Parse(format!(
                    "expected a json array of predictions, found {}",
                    json_kind(&other)
                )));
            }
        },
        DatasetFormat::JsonLines => serde_json::Deserializer::from_reader(reader)
            .into_iter::<Value>()
            .collect::<Result<_, _>>()?,
    };

    let records = values
        .into_iter()
        .enumerate()
        .map(|(position, value)| PredictionRecord::from_value(position, value, options, decoder))
        .collect::<NBResult<Vec<_>>>()?;

    Ok(PredictionDataset::from_records(options.clone(), records))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl PredictionDataset {
    /// Build a dataset from already-loaded records.
    pub fn from_records(
        options: DatasetOptions,
        records: Vec<PredictionRecord>,
    ) -> Self {
        Self { options, records }
    }

    /// Build a dataset of bare texts, under the default fields.
    pub fn from_texts<W, S>(texts: W) -> Self
    where
        W: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let records = texts
            .into_iter()
            .enumerate()
            .map(|(position, text)| PredictionRecord::new(position, text))
            .collect();
        Self::from_records(DatasetOptions::default(), records)
    }

    /// The options this dataset was loaded with.
    pub fn options(&self) -> &DatasetOptions {
        &self.options
    }

    /// The source-text field name.
    pub fn text_field(&self) -> &str {
        &self.options.text_field
    }

    /// The carried-through field names.
    pub fn extra_fields(&self) -> &[String] {
        &self.options.extra_fields
    }

    /// The number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Is the dataset empty?
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records, in load order.
    pub fn records(&self) -> &[PredictionRecord] {
        &self.records
    }

    /// Get a record by position.
    pub fn get(
        &self,
        position: usize,
    ) -> Option<&PredictionRecord> {
        self.records.get(position)
    }

    /// The number of batches a keep-last generator yields.
    ///
    /// ## Arguments
    /// * `batch_size` - the batch size; must be positive.
    pub fn get_num_batches(
        &self,
        batch_size: usize,
    ) -> NBResult<usize> {
        self.num_batches(&BatchOptions::new(batch_size))
    }

    /// The number of batches a generator with `options` yields.
    pub fn num_batches(
        &self,
        options: &BatchOptions,
    ) -> NBResult<usize> {
        options.num_batches(self.len())
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, io::Cursor};

    use tempdir::TempDir;

    use super::*;

    #[test]
    fn test_load_json_array() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = TempDir::new("nmtbatch_dataset")?;
        let path = tmp_dir.path().join("prediction.json");
        fs::write(
            &path,
            r#"[{"prediction": "첫째"}, {"prediction": "둘째", "score": 0.5}, "셋째"]"#,
        )?;

        let dataset = load_dataset(&path)?;
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.text_field(), "prediction");
        assert_eq!(
            dataset
                .records()
                .iter()
                .map(|r| r.text())
                .collect::<Vec<_>>(),
            vec!["첫째", "둘째", "셋째"]
        );
        assert_eq!(dataset.get(2).map(|r| r.position()), Some(2));
        Ok(())
    }

    #[test]
    fn test_load_json_lines() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = TempDir::new("nmtbatch_dataset")?;
        let path = tmp_dir.path().join("prediction.jsonl");
        fs::write(&path, "{\"text\": \"a\"}\n\n{\"text\": \"b\"}\n")?;

        let options = DatasetOptions::default().with_text_field("text");
        let dataset = load_dataset_with(&path, &options, None)?;
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.text_field(), "text");
        Ok(())
    }

    #[test]
    fn test_load_failures() {
        assert!(matches!(
            load_dataset("/nonexistent/prediction.json"),
            Err(NmtBatchError::Io(_))
        ));

        let options = DatasetOptions::default();
        for (source, kind) in [("[1, 2", "parse"), ("{\"prediction\": \"x\"}", "parse")] {
            let result = read_dataset(Cursor::new(source), DatasetFormat::Json, &options, None);
            assert!(matches!(result, Err(NmtBatchError::Parse(_))), "{kind}: {result:?}");
        }

        assert!(matches!(
            read_dataset(
                Cursor::new(r#"["a", {"other": "b"}]"#),
                DatasetFormat::Json,
                &options,
                None
            ),
            Err(NmtBatchError::MissingField { position: 1, .. })
        ));
    }

    #[test]
    fn test_num_batches() {
        let dataset = PredictionDataset::from_texts(["a", "b", "c", "d", "e"]);
        assert_eq!(dataset.get_num_batches(2).unwrap(), 3);
        assert_eq!(dataset.get_num_batches(5).unwrap(), 1);
        assert_eq!(dataset.get_num_batches(32).unwrap(), 1);
        assert_eq!(
            dataset
                .num_batches(&BatchOptions::new(2).with_drop_last(true))
                .unwrap(),
            2
        );
        assert!(matches!(
            dataset.get_num_batches(0),
            Err(NmtBatchError::InvalidBatchSize)
        ));

        let empty = PredictionDataset::from_texts(Vec::<String>::new());
        assert!(empty.is_empty());
        assert_eq!(empty.get_num_batches(4).unwrap(), 0);
    }
}
