use nmtbatch::{
    batching::{BatchOptions, DEFAULT_BATCH_SIZE},
    dataset::{DEFAULT_TEXT_FIELD, DatasetOptions, load_dataset_with},
};

use crate::{decoder_args::DecoderArgs, logging::LogArgs};

/// Args for the batches command.
#[derive(clap::Args, Debug)]
pub struct BatchesArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    /// Predictions file; a json array, or json lines.
    #[arg(long)]
    prediction_json: String,

    /// Records per batch.
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Discard a short final batch.
    #[arg(long)]
    drop_last: bool,

    /// Source text field of each prediction.
    #[arg(long, default_value = DEFAULT_TEXT_FIELD)]
    text_field: String,

    #[command(flatten)]
    decoder: DecoderArgs,
}

impl BatchesArgs {
    /// Run the batches command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let decoder = self.decoder.build_decoder()?;
        let options = DatasetOptions::default().with_text_field(self.text_field.clone());
        let dataset = load_dataset_with(&self.prediction_json, &options, decoder.as_deref())?;

        let batch_options = BatchOptions::new(self.batch_size).with_drop_last(self.drop_last);
        let num_batches = dataset.num_batches(&batch_options)?;

        println!("records: {}", dataset.len());
        println!("batches: {num_batches}");
        println!(
            "batched records: {}",
            batch_options.num_batched_records(dataset.len())?
        );

        Ok(())
    }
}
