//! # `nmtbatch` Batch Translation Pipeline
//!
//! Translate a file of source-language model predictions, batch by batch,
//! through a translation service; and save the source/translation pairs.
//!
//! Runs are interruption safe: cancellation is observed between batches,
//! and every exit path writes the results gathered so far. Results files
//! are never overwritten.
//!
//! See:
//! * [`vocab`] to load index to token vocabularies.
//! * [`decoders`] to decode model output indices into text.
//! * [`dataset`] to load prediction files.
//! * [`batching`] to group predictions into batches.
//! * [`translate`] for translation service backends.
//! * [`pipeline`] to run the whole thing.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``http``
//!
//! #### feature: ``http``
//!
//! Enables [`translate::HttpTranslationService`], a blocking ``reqwest`` json client.
//!
//! #### feature: ``hub``
//!
//! Lets [`decoders::load_tokenizer`] fetch ``tokenizer.json`` files by model name.
//!
//! ## Running a Pipeline
//!
//! ```rust,no_run
//! use nmtbatch::pipeline::{CancellationToken, PipelineOptions, TranslationPipeline};
//! use nmtbatch::translate::HttpServiceOptions;
//!
//! let service = HttpServiceOptions::default()
//!     .with_base_url("http://127.0.0.1:24080")
//!     .build()?;
//!
//! let pipeline = TranslationPipeline::new(
//!     PipelineOptions::new("prediction.json", "translated/results.json")
//!         .with_batch_size(32)
//!         .with_languages("ko", "en"),
//! );
//!
//! let report = pipeline.run(&service, &CancellationToken::new())?;
//! println!("{} results in {}", report.records, report.output_path.display());
//! # Ok::<(), nmtbatch::NmtBatchError>(())
//! ```
#![warn(missing_docs, unused)]

pub mod batching;
pub mod dataset;
pub mod decoders;
pub mod errors;
pub mod pipeline;
pub mod runtime;
pub mod translate;
pub mod vocab;

pub use errors::{NBResult, NmtBatchError};
pub use runtime::{Device, RuntimeConfig};
