//! # Batching
//!
//! [`BatchGenerator`] groups the records of a [`PredictionDataset`](crate::dataset::PredictionDataset)
//! into column-oriented [`Batch`]es.
//!
//! ## Example
//!
//! ```rust
//! use nmtbatch::batching::{BatchOptions, generate_raw_batches};
//! use nmtbatch::dataset::PredictionDataset;
//! use nmtbatch::runtime::RuntimeConfig;
//!
//! let dataset = PredictionDataset::from_texts(["a", "b", "c"]);
//! let sizes: Vec<usize> =
//!     generate_raw_batches(&dataset, BatchOptions::new(2), RuntimeConfig::default())
//!         .unwrap()
//!         .map(|batch| batch.len())
//!         .collect();
//! assert_eq!(sizes, vec![2, 1]);
//! ```

pub mod batch;
pub mod batch_generator;
pub mod batch_options;

pub use batch::Batch;
pub use batch_generator::{BatchGenerator, BatchIter, generate_raw_batches};
pub use batch_options::{BatchOptions, DEFAULT_BATCH_SIZE};
