mod commands;
mod decoder_args;
mod input_output;
mod logging;
mod runtime_args;

use clap::Parser;
use commands::Commands;

/// nmtbatch: batch translation of model predictions.
#[derive(clap::Parser, Debug)]
#[command(version)]
pub struct Args {
    /// Subcommand to run.
    #[clap(subcommand)]
    pub command: Commands,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    args.command.run()
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }
}
