use std::{io::IsTerminal, time::Duration};

use nmtbatch::{
    batching::DEFAULT_BATCH_SIZE,
    dataset::{DEFAULT_TEXT_FIELD, DatasetOptions},
    pipeline::{
        CancellationToken,
        DEFAULT_SOURCE_FIELD,
        DEFAULT_TARGET_FIELD,
        PipelineOptions,
        PipelineState,
        TranslationPipeline,
    },
    translate::{
        DEFAULT_MODEL_NAME,
        DEFAULT_SOURCE_LANG,
        DEFAULT_TARGET_LANG,
        HttpServiceOptions,
        http_service::DEFAULT_SERVICE_URL,
    },
};

use crate::{decoder_args::DecoderArgs, logging::LogArgs, runtime_args::RuntimeArgs};

/// Exit status for a second interrupt.
const INTERRUPT_EXIT_CODE: i32 = 130;

/// Args for the translate command.
#[derive(clap::Args, Debug)]
pub struct TranslateArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    /// Predictions file; a json array, or json lines.
    #[arg(long)]
    prediction_json: String,

    /// Results file; must not already exist.
    #[arg(long)]
    output_path: String,

    /// Translation model name.
    #[arg(long, default_value = DEFAULT_MODEL_NAME)]
    model_name: String,

    /// Source language tag.
    #[arg(long, default_value = DEFAULT_SOURCE_LANG)]
    source_lang: String,

    /// Target language tag.
    #[arg(long, default_value = DEFAULT_TARGET_LANG)]
    target_lang: String,

    /// Records per translation request.
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Translation server base url.
    #[arg(long, default_value = DEFAULT_SERVICE_URL)]
    service_url: String,

    /// Bearer token for the translation server.
    #[arg(long, default_value = None)]
    api_key: Option<String>,

    /// Request timeout, in seconds; unset waits indefinitely.
    #[arg(long, default_value = None)]
    timeout_secs: Option<u64>,

    /// Source text field of each prediction.
    #[arg(long, default_value = DEFAULT_TEXT_FIELD)]
    text_field: String,

    /// Additional prediction fields copied into each result.
    #[arg(long = "extra-field")]
    extra_fields: Vec<String>,

    /// Result field for source texts.
    #[arg(long, default_value = DEFAULT_SOURCE_FIELD)]
    source_field: String,

    /// Result field for translations.
    #[arg(long, default_value = DEFAULT_TARGET_FIELD)]
    target_field: String,

    /// Disable the progress bar.
    #[arg(long)]
    no_progress: bool,

    #[command(flatten)]
    runtime: RuntimeArgs,

    #[command(flatten)]
    decoder: DecoderArgs,
}

impl TranslateArgs {
    /// Run the translate command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let cancel = CancellationToken::new();
        install_interrupt_handler(cancel.clone())?;

        let runtime = self.runtime.runtime_config();

        let service = HttpServiceOptions::default()
            .with_base_url(self.service_url.clone())
            .with_model(self.model_name.clone())
            .with_device(runtime.device.clone())
            .with_api_key(self.api_key.clone())
            .with_timeout(self.timeout_secs.map(Duration::from_secs))
            .build()?;
        log::info!("model: {} via {}", self.model_name, service.options().endpoint());

        let options = PipelineOptions::new(&self.prediction_json, &self.output_path)
            .with_batch_size(self.batch_size)
            .with_languages(self.source_lang.clone(), self.target_lang.clone())
            .with_result_fields(self.source_field.clone(), self.target_field.clone())
            .with_show_progress(!self.no_progress && std::io::stdout().is_terminal())
            .with_dataset(
                DatasetOptions::default()
                    .with_text_field(self.text_field.clone())
                    .with_extra_fields(self.extra_fields.iter().cloned()),
            )
            .with_runtime(runtime);

        let pipeline =
            TranslationPipeline::new(options).with_decoder(self.decoder.build_decoder()?);

        let report = pipeline.run(&service, &cancel)?;
        if report.state == PipelineState::Interrupted {
            eprintln!(
                "Interrupted: saved {} results to {}",
                report.records,
                report.output_path.display()
            );
        }

        Ok(())
    }
}

/// The first interrupt stops the pipeline after the current batch;
/// a second one exits immediately.
fn install_interrupt_handler(cancel: CancellationToken) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        if cancel.cancel() {
            eprintln!("Interrupted again; exiting without saving.");
            std::process::exit(INTERRUPT_EXIT_CODE);
        }
        log::warn!("interrupt received; stopping after the current batch");
    })
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(clap::Parser, Debug)]
    struct TestArgs {
        #[clap(flatten)]
        translate: TranslateArgs,
    }

    #[test]
    fn test_defaults() {
        let args = TestArgs::parse_from([
            "test",
            "--prediction-json",
            "prediction.json",
            "--output-path",
            "out/results.json",
        ])
        .translate;

        assert_eq!(args.model_name, "opus-mt");
        assert_eq!(args.source_lang, "ko");
        assert_eq!(args.target_lang, "en");
        assert_eq!(args.batch_size, 32);
        assert_eq!(args.text_field, "prediction");
        assert!(args.extra_fields.is_empty());
        assert_eq!(args.runtime.runtime_config().device, nmtbatch::Device::Cpu);
    }

    #[test]
    fn test_device_and_fields() {
        let args = TestArgs::parse_from([
            "test",
            "--prediction-json",
            "p.jsonl",
            "--output-path",
            "r.json",
            "--device",
            "cuda:0,1",
            "--extra-field",
            "id",
            "--extra-field",
            "source",
            "--batch-size",
            "8",
        ])
        .translate;

        assert_eq!(
            args.runtime.runtime_config().device,
            nmtbatch::Device::Cuda(vec![0, 1])
        );
        assert_eq!(args.extra_fields, vec!["id", "source"]);
        assert_eq!(args.batch_size, 8);
    }
}
