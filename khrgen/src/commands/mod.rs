mod check;
mod completions;
mod generate;
mod list;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use list::ListCommand;

/// Extension trait for exiting on registry errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for khrgen_registry::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "khrgen")]
#[command(version)]
#[command(about = "Generate C++ API bindings from the Khronos XML registry")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::List(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the binding source tree from a registry document
    Generate(GenerateCommand),

    /// Resolve and verify a registry document without generating code
    Check(CheckCommand),

    /// List the features and extensions parsed from a registry document
    List(ListCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
