//! `sigil` command line interface

mod commands;
mod run;

pub use commands::{Cli, Commands};
pub use run::{CliError, run, run_with_output};
