use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use khrgen_codegen::IncoreTable;
use khrgen_registry::RegistryFile;

use super::UnwrapOrExit;
use crate::ops;
use crate::reports::{Report, TerminalOutput};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the registry document (e.g. gl.xml)
    #[arg(short = 's', long = "spec")]
    pub spec: PathBuf,

    /// Path to a patch document of the same schema
    #[arg(short, long)]
    pub patch: Option<PathBuf>,

    /// Target API identifier
    #[arg(long, default_value = "gl")]
    pub api: String,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let registry = RegistryFile::open(&self.spec)
            .unwrap_or_exit()
            .parse_api(&self.api)
            .unwrap_or_exit();

        let patch = match &self.patch {
            Some(path) => Some(
                RegistryFile::open(path)
                    .unwrap_or_exit()
                    .parse_patch(&self.api)
                    .unwrap_or_exit(),
            ),
            None => None,
        };

        let report = ops::check(registry, patch, IncoreTable::builtin()?, &self.spec)?;
        let failed = report.has_errors();
        report.render(&mut TerminalOutput::new());

        if failed {
            std::process::exit(1);
        }
        Ok(())
    }
}
