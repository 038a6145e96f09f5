use std::path::{Path, PathBuf};

use clap::Args;
use eyre::{Context, Result};
use khrgen_codegen::IncoreTable;
use khrgen_registry::RegistryFile;

use super::UnwrapOrExit;
use crate::ops::{self, GenerateOptions};
use crate::reports::{Report, TerminalOutput};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to the registry document (e.g. gl.xml)
    #[arg(short = 's', long = "spec")]
    pub spec: PathBuf,

    /// Path to a patch document of the same schema
    #[arg(short, long)]
    pub patch: Option<PathBuf>,

    /// Output directory for the generated source tree
    #[arg(short = 'd', long = "directory", default_value = ".")]
    pub directory: PathBuf,

    /// Path to the registry revision side file
    #[arg(short, long)]
    pub revision: Option<PathBuf>,

    /// Target API identifier
    #[arg(long, default_value = "gl")]
    pub api: String,

    /// Replacement extension fold-in table
    #[arg(long)]
    pub incore: Option<PathBuf>,

    /// Preview generated artifacts without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Write pipeline snapshots for debugging
    #[arg(long)]
    pub visualize: bool,

    /// Regenerate even when the output tree carries the current revision
    #[arg(long)]
    pub force: bool,
}

impl GenerateCommand {
    /// Run the generate command
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

        let incore = match &self.incore {
            Some(path) => IncoreTable::from_path(path)?,
            None => IncoreTable::builtin()?,
        };

        let revision = read_revision(self.revision.as_deref())?;

        let report = ops::generate(
            registry,
            patch,
            incore,
            GenerateOptions {
                output_dir: &self.directory,
                revision,
                dry_run: self.dry_run,
                visualize: self.visualize,
                force: self.force,
            },
        )?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}

/// Read the monotonically increasing registry revision from its side file.
/// Without a side file the revision is 0 and the gate never triggers.
fn read_revision(path: Option<&Path>) -> Result<u32> {
    let Some(path) = path else {
        return Ok(0);
    };
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read revision file '{}'", path.display()))?;
    content
        .lines()
        .next()
        .unwrap_or_default()
        .trim()
        .parse()
        .wrap_err_with(|| format!("invalid revision in '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_revision_none() {
        assert_eq!(read_revision(None).unwrap(), 0);
    }

    #[test]
    fn test_read_revision_first_line() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("glrevision");
        std::fs::write(&path, "31337\n").unwrap();
        assert_eq!(read_revision(Some(&path)).unwrap(), 31337);
    }

    #[test]
    fn test_read_revision_invalid() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("glrevision");
        std::fs::write(&path, "not a number\n").unwrap();
        assert!(read_revision(Some(&path)).is_err());
    }
}
