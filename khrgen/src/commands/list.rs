use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use khrgen_registry::RegistryFile;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct ListCommand {
    /// Path to the registry document (e.g. gl.xml)
    #[arg(short = 's', long = "spec")]
    pub spec: PathBuf,

    /// Target API identifier
    #[arg(long, default_value = "gl")]
    pub api: String,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let registry = RegistryFile::open(&self.spec)
            .unwrap_or_exit()
            .parse_api(&self.api)
            .unwrap_or_exit();

        if registry.features.is_empty() {
            println!("No features for api '{}'", self.api);
        } else {
            println!("Features:");
            for feature in &registry.features {
                println!(
                    "  {} {} ({} enums, {} commands)",
                    self.api,
                    feature.version,
                    feature.req_enums.len(),
                    feature.req_commands.len()
                );
            }
        }

        if !registry.extensions.is_empty() {
            println!("\nExtensions:");
            for extension in &registry.extensions {
                println!("  {}", extension.name);
            }
        }

        Ok(())
    }
}
