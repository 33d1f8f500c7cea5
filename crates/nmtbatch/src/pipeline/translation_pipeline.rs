//! # Translation Pipeline

use std::{path::PathBuf, sync::Arc};

use indicatif::ProgressBar;

use crate::{
    batching::{Batch, BatchGenerator, BatchIter, BatchOptions},
    dataset::{PredictionDataset, load_dataset_with},
    decoders::SequenceDecoder,
    errors::NBResult,
    pipeline::{CancellationToken, PipelineOptions, ResultRecord, ResultSink},
    translate::{TranslationService, check_translation_count},
};

/// How a pipeline run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Every batch was translated.
    Completed,

    /// Cancellation was observed between batches.
    Interrupted,
}

/// The outcome of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// The final state.
    pub state: PipelineState,

    /// The number of batches translated.
    pub batches: usize,

    /// The total number of batches.
    pub total_batches: usize,

    /// The number of results written.
    pub records: usize,

    /// The results file.
    pub output_path: PathBuf,
}

impl PipelineReport {
    /// Did the run translate every batch?
    pub fn is_complete(&self) -> bool {
        self.state == PipelineState::Completed
    }
}

/// Batch translation of a predictions file into a results file.
///
/// A run loads the dataset, translates it in order, one batch per service call,
/// and writes all results as one json array. Results gathered before a
/// cancellation, a service error, or a panic are still written.
#[derive(Clone)]
pub struct TranslationPipeline {
    options: PipelineOptions,
    decoder: Option<Arc<SequenceDecoder>>,
}

impl TranslationPipeline {
    /// Create a new pipeline.
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            options,
            decoder: None,
        }
    }

    /// Sets the decoder for index-only predictions.
    pub fn with_decoder(
        mut self,
        decoder: Option<Arc<SequenceDecoder>>,
    ) -> Self {
        self.decoder = decoder;
        self
    }

    /// The pipeline options.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Load the predictions dataset.
    pub fn load_dataset(&self) -> NBResult<PredictionDataset> {
        load_dataset_with(
            &self.options.input_path,
            &self.options.dataset,
            self.decoder.as_deref(),
        )
    }

    /// Run the pipeline.
    ///
    /// ## Arguments
    /// * `service` - the translation backend.
    /// * `cancel` - checked before each batch.
    ///
    /// ## Returns
    /// A [`PipelineReport`]; or the load error, the `OutputExists` error, or the
    /// translation error (after the partial results are written).
    pub fn run(
        &self,
        service: &dyn TranslationService,
        cancel: &CancellationToken,
    ) -> NBResult<PipelineReport> {
        let dataset = self.load_dataset()?;
        self.run_dataset(&dataset, service, cancel)
    }

    /// Run the pipeline over an already-loaded dataset.
    ///
    /// See [`TranslationPipeline::run`].
    pub fn run_dataset(
        &self,
        dataset: &PredictionDataset,
        service: &dyn TranslationService,
        cancel: &CancellationToken,
    ) -> NBResult<PipelineReport> {
        let options = &self.options;
        let mut generator = BatchGenerator::new(
            dataset,
            BatchOptions::new(options.batch_size),
            options.runtime.clone(),
        )?;
        let total_batches = dataset.get_num_batches(options.batch_size)?;

        let mut sink = ResultSink::create(&options.output_path)?;

        log::info!(
            "translating {} records in {total_batches} batches ({} -> {})",
            dataset.len(),
            options.source_lang,
            options.target_lang,
        );

        let progress = if options.show_progress {
            ProgressBar::new(total_batches as u64)
        } else {
            ProgressBar::hidden()
        };

        let outcome = self.translate_batches(
            dataset,
            generator.iter(),
            service,
            cancel,
            &mut sink,
            &progress,
        );
        progress.finish_and_clear();

        let output_path = sink.path().to_path_buf();
        let written = sink.finish();

        let (state, batches, records) = match (outcome, written) {
            (Ok((state, batches)), Ok(records)) => (state, batches, records),
            (Ok(_), Err(e)) => return Err(e),
            (Err(e), Ok(records)) => {
                log::error!(
                    "translation failed; saved {records} results to {}",
                    output_path.display()
                );
                return Err(e);
            }
            (Err(e), Err(flush_err)) => {
                log::error!("failed to save partial results: {flush_err}");
                return Err(e);
            }
        };

        let report = PipelineReport {
            state,
            batches,
            total_batches,
            records,
            output_path,
        };

        match state {
            PipelineState::Completed => log::info!(
                "translated {} records; saved to {}",
                report.records,
                report.output_path.display()
            ),
            PipelineState::Interrupted => log::warn!(
                "interrupted after {batches} of {total_batches} batches; saved {} results to {}",
                report.records,
                report.output_path.display()
            ),
        }

        Ok(report)
    }

    fn translate_batches(
        &self,
        dataset: &PredictionDataset,
        batches: BatchIter<'_>,
        service: &dyn TranslationService,
        cancel: &CancellationToken,
        sink: &mut ResultSink,
        progress: &ProgressBar,
    ) -> NBResult<(PipelineState, usize)> {
        let mut count = 0;
        for batch in batches {
            if cancel.is_cancelled() {
                return Ok((PipelineState::Interrupted, count));
            }

            let records = self.translate_batch(dataset, batch, service)?;
            sink.extend(records);
            count += 1;

            log::debug!("batch {count}: {} results", sink.len());
            progress.inc(1);
        }
        Ok((PipelineState::Completed, count))
    }

    fn translate_batch(
        &self,
        dataset: &PredictionDataset,
        mut batch: Batch,
        service: &dyn TranslationService,
    ) -> NBResult<Vec<ResultRecord>> {
        let options = &self.options;
        let sources = batch
            .take_column(dataset.text_field())
            .unwrap_or_default();

        let targets = service.translate(&sources, &options.source_lang, &options.target_lang)?;
        check_translation_count(sources.len(), &targets)?;

        let extras: Vec<(&str, &[String])> = dataset
            .extra_fields()
            .iter()
            .filter_map(|field| batch.column(field).map(|column| (field.as_str(), column)))
            .collect();

        Ok(sources
            .into_iter()
            .zip(targets)
            .enumerate()
            .map(|(i, (source, target))| {
                let mut record = ResultRecord::new()
                    .with_field(options.source_field.as_str(), source)
                    .with_field(options.target_field.as_str(), target);
                for (field, column) in &extras {
                    if let Some(value) = column.get(i) {
                        record.push(*field, value.as_str());
                    }
                }
                record
            })
            .collect())
    }
}
