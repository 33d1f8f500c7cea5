use std::io::Write;

use nmtbatch::dataset::{DEFAULT_INDICES_FIELD, DEFAULT_TEXT_FIELD, DatasetOptions, load_dataset_with};

use crate::{decoder_args::DecoderArgs, input_output::OutputArgs, logging::LogArgs};

/// Args for the decode command.
#[derive(clap::Args, Debug)]
pub struct DecodeArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    /// Predictions file; a json array, or json lines.
    #[arg(long)]
    prediction_json: String,

    /// Token index field of each prediction.
    #[arg(long, default_value = DEFAULT_INDICES_FIELD)]
    indices_field: String,

    /// Source text field, used for predictions without indices.
    #[arg(long, default_value = DEFAULT_TEXT_FIELD)]
    text_field: String,

    #[command(flatten)]
    decoder: DecoderArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl DecodeArgs {
    /// Run the decode command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let decoder = self
            .decoder
            .build_decoder()?
            .ok_or("decode requires --vocab")?;

        let options = DatasetOptions::default()
            .with_text_field(self.text_field.clone())
            .with_indices_field(self.indices_field.clone());
        let dataset = load_dataset_with(&self.prediction_json, &options, Some(decoder.as_ref()))?;

        let mut writer = self.output.open_writer()?;
        for record in dataset.records() {
            let text = match record.indices() {
                Some(indices) => decoder.decode_indices(indices)?,
                None => record.text().to_string(),
            };
            writeln!(writer, "{text}")?;
        }
        writer.flush()?;

        log::info!("decoded {} predictions", dataset.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use tempdir::TempDir;

    use super::*;

    #[derive(clap::Parser, Debug)]
    struct TestArgs {
        #[clap(flatten)]
        decode: DecodeArgs,
    }

    #[test]
    fn test_decode_segments() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = TempDir::new("nmtbatch_decode")?;
        let vocab = tmp_dir.path().join("vocab.json");
        let predictions = tmp_dir.path().join("prediction.json");
        let output = tmp_dir.path().join("decoded.txt");

        fs::write(
            &vocab,
            r#"{"token_to_idx": {"<MASK>": 0, "<UNK>": 1, "<BEGIN>": 2, "<END>": 3, "▁좋은": 4, "▁아침": 5}}"#,
        )?;
        fs::write(
            &predictions,
            r#"[{"prediction_indices": [4, 5, 3, 0]}, {"prediction_indices": [4, 1]}, "그대로"]"#,
        )?;

        let path = |p: &std::path::Path| p.to_string_lossy().to_string();
        let args = TestArgs::parse_from([
            "test".to_string(),
            "-q".to_string(),
            "--prediction-json".to_string(),
            path(&predictions),
            "--vocab".to_string(),
            path(&vocab),
            "--decode-strategy".to_string(),
            "segment".to_string(),
            "--output".to_string(),
            path(&output),
        ])
        .decode;
        args.run()?;

        assert_eq!(fs::read_to_string(&output)?, "좋은 아침\n좋은 <UNK>\n그대로\n");
        Ok(())
    }
}
