//! List command implementation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use console::style;

use crate::commands::load_context;
use crate::utils::terminal::print_info;

/// List declared plugins with their resolved effective minimum versions
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Path to extdeps.toml (discovered in parent directories by default)
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

impl ListCommand {
    /// Execute the list command
    pub fn execute(self, verbose: bool) -> Result<()> {
        let ctx = load_context(self.manifest, None)?;
        if verbose {
            print_info(&format!("manifest: {}", ctx.manifest_path.display()));
        }

        let requirements = ctx.manifest.requirements();
        if requirements.is_empty() {
            print_info("no plugin requirements declared");
            return Ok(());
        }

        for requirement in requirements.iter() {
            match requirement.effective_min_version()? {
                Some(version) => {
                    println!("{} >= {}", style(requirement.name()).cyan(), version)
                }
                None => println!(
                    "{} {}",
                    style(requirement.name()).cyan(),
                    style("(any version)").dim()
                ),
            }
        }

        Ok(())
    }
}
