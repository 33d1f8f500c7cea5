//! # Translation Pipeline
//!
//! Load a predictions dataset, translate it batch by batch, and write the
//! results as a json array of ordered records:
//!
//! ```json
//! [{"prediction_source": "안녕하세요", "prediction_target": "Hello"}]
//! ```
//!
//! The results file is created exclusively; an existing file is never touched.
//! A [`CancellationToken`] stops the run between batches, and the results
//! translated so far are still written.

pub mod cancellation;
pub mod pipeline_options;
pub mod result_record;
pub mod result_sink;
pub mod translation_pipeline;

pub use cancellation::CancellationToken;
pub use pipeline_options::{DEFAULT_SOURCE_FIELD, DEFAULT_TARGET_FIELD, PipelineOptions};
pub use result_record::ResultRecord;
pub use result_sink::ResultSink;
pub use translation_pipeline::{PipelineReport, PipelineState, TranslationPipeline};
