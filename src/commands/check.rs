//! Check command implementation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::commands::load_context;
use crate::document::DocumentStore;
use crate::reconcile::{reconcile, Disposition};
use crate::utils::terminal::{print_error, print_success, print_warning};

/// Verify the document matches the declared requirements (CI gate)
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Path to extdeps.toml (discovered in parent directories by default)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Path to the document to verify (overrides [document] in the manifest)
    #[arg(long)]
    pub document: Option<PathBuf>,
}

impl CheckCommand {
    /// Execute the check command
    pub fn execute(self, verbose: bool) -> Result<()> {
        let ctx = load_context(self.manifest, self.document)?;

        let requirements = ctx.manifest.requirements();
        let store = DocumentStore::new(&ctx.document_path);
        let existing = store.load()?;
        let outcome = reconcile(&requirements, existing)?;

        for warning in &outcome.warnings {
            print_warning(warning);
        }

        let in_sync = match outcome.disposition {
            Disposition::Noop => true,
            // A document exists that a sync would remove.
            Disposition::Delete => false,
            Disposition::Write => {
                let desired = store.render(&outcome.entries)?;
                store.current_text()?.as_deref() == Some(desired.as_str())
            }
        };

        if in_sync {
            print_success(&format!("{} is up to date", ctx.document_path.display()));
            return Ok(());
        }

        if verbose && outcome.disposition == Disposition::Write {
            for entry in &outcome.entries {
                match &entry.min_version {
                    Some(version) => println!("  {} >= {}", entry.id, version),
                    None => println!("  {}", entry.id),
                }
            }
        }
        print_error(&format!(
            "{} is out of date; run 'extdeps sync'",
            ctx.document_path.display()
        ));
        std::process::exit(1);
    }
}
