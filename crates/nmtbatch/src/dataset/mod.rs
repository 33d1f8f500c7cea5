//! # Prediction Datasets
//!
//! Source-language predictions are loaded from a json array, or json lines,
//! of entries. An entry is either a bare string or an object:
//!
//! ```json
//! [
//!   {"prediction": "안녕하세요", "prediction_indices": [4, 9, 3]},
//!   "좋은 아침"
//! ]
//! ```
//!
//! Entries without the text field may be decoded from their indices at load time,
//! see [`load_dataset_with`].

pub mod dataset_options;
pub mod prediction_dataset;
pub mod prediction_record;

pub use dataset_options::{DEFAULT_INDICES_FIELD, DEFAULT_TEXT_FIELD, DatasetFormat, DatasetOptions};
pub use prediction_dataset::{PredictionDataset, load_dataset, load_dataset_with, read_dataset};
pub use prediction_record::PredictionRecord;
