//! Sync command implementation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::commands::load_context;
use crate::document::DocumentStore;
use crate::reconcile::{reconcile, Disposition};
use crate::utils::terminal::{print_info, print_success, print_warning};

/// Reconcile declared plugin requirements into the document
#[derive(Args, Debug)]
pub struct SyncCommand {
    /// Path to extdeps.toml (discovered in parent directories by default)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Path to the document to update (overrides [document] in the manifest)
    #[arg(long)]
    pub document: Option<PathBuf>,

    /// Compute the result without touching the document
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncCommand {
    /// Execute the sync command
    pub fn execute(self, verbose: bool) -> Result<()> {
        let ctx = load_context(self.manifest, self.document)?;
        if verbose {
            print_info(&format!("manifest: {}", ctx.manifest_path.display()));
            print_info(&format!("document: {}", ctx.document_path.display()));
        }

        let requirements = ctx.manifest.requirements();
        if verbose {
            print_info(&format!("{} plugins declared", requirements.len()));
        }

        let store = DocumentStore::new(&ctx.document_path);
        let existing = store.load()?;
        let outcome = reconcile(&requirements, existing)?;

        for warning in &outcome.warnings {
            print_warning(warning);
        }

        match outcome.disposition {
            // Nothing declared, nothing on disk: stay quiet.
            Disposition::Noop => {
                if verbose {
                    print_info("no plugin requirements declared and no document to remove");
                }
            }
            Disposition::Delete => {
                if self.dry_run {
                    print_info(&format!(
                        "would remove {} (no plugin requirements declared)",
                        ctx.document_path.display()
                    ));
                } else {
                    store.delete()?;
                    print_success(&format!("removed {}", ctx.document_path.display()));
                }
            }
            Disposition::Write => {
                if verbose || self.dry_run {
                    for entry in &outcome.entries {
                        match &entry.min_version {
                            Some(version) => println!("  {} >= {}", entry.id, version),
                            None => println!("  {}", entry.id),
                        }
                    }
                }
                if self.dry_run {
                    print_info(&format!(
                        "would update {} ({} plugins)",
                        ctx.document_path.display(),
                        outcome.entries.len()
                    ));
                } else {
                    store.write(&outcome.entries)?;
                    print_success(&format!(
                        "updated {} ({} plugins)",
                        ctx.document_path.display(),
                        outcome.entries.len()
                    ));
                }
            }
        }

        Ok(())
    }
}
