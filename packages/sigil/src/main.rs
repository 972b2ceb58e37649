//! Entry point for the sigil CLI

use clap::Parser;
use sigil::LoggingTransformer;
use sigil::cli::{Cli, run};
use std::process::ExitCode;

fn main() -> ExitCode {
    LoggingTransformer::init();

    let cli = Cli::parse();
    let command = cli.command.name();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            e.log_crypto_failure(command);
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}
