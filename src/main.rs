//! extdeps CLI - keeps IntelliJ IDEA externalDependencies.xml in sync
//!
//! Build tooling (or a human) declares the plugins a project needs and the
//! minimum versions it needs them at; `extdeps sync` merges those
//! requirements into `.idea/externalDependencies.xml` idempotently, leaving
//! everything else in the file alone.

mod cli;
mod commands;
mod config;
mod dependency;
mod document;
mod error;
mod reconcile;
mod utils;

use clap::Parser;

use cli::Cli;
use error::ExtdepsError;
use utils::terminal::print_error;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = cli.execute() {
        match err.downcast_ref::<ExtdepsError>() {
            Some(extdeps_err) => extdeps_err.display_with_hints(),
            None => print_error(&format!("{:#}", err)),
        }
        std::process::exit(1);
    }
}
