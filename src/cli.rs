//! CLI argument parsing using clap derive macros

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{check::CheckCommand, list::ListCommand, sync::SyncCommand};

/// extdeps - keep IntelliJ IDEA externalDependencies.xml in sync
///
/// Reconciles declared plugin requirements from extdeps.toml into the
/// project's externalDependencies.xml, without clobbering content other
/// tools keep in that file.
#[derive(Parser, Debug)]
#[command(name = "extdeps")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconcile declared requirements into the document
    Sync(SyncCommand),

    /// Verify the document is up to date (exit 1 when stale)
    Check(CheckCommand),

    /// List declared plugins with their resolved minimum versions
    List(ListCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        // Set up terminal colors
        if self.no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }

        // Execute the subcommand
        match self.command {
            Commands::Sync(cmd) => cmd.execute(self.verbose),
            Commands::Check(cmd) => cmd.execute(self.verbose),
            Commands::List(cmd) => cmd.execute(self.verbose),
        }
    }
}
