mod batches;
mod decode;
mod translate;

/// Subcommands for nmtbatch
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Translate a predictions file.
    Translate(translate::TranslateArgs),

    /// Decode the index sequences of a predictions file to text.
    Decode(decode::DecodeArgs),

    /// Report record and batch counts for a predictions file.
    Batches(batches::BatchesArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Translate(cmd) => cmd.run(),
            Commands::Decode(cmd) => cmd.run(),
            Commands::Batches(cmd) => cmd.run(),
        }
    }
}
