//! Command implementations
//!
//! Each command module provides a clap-derived struct and execute method.

pub mod check;
pub mod list;
pub mod sync;

use std::path::PathBuf;

use anyhow::Result;

use crate::config::Manifest;
use crate::utils::paths::find_manifest;

/// Everything a command needs to run one pass: the loaded manifest and the
/// resolved paths, honoring --manifest and --document overrides.
pub(crate) struct RunContext {
    pub manifest: Manifest,
    pub manifest_path: PathBuf,
    pub document_path: PathBuf,
}

pub(crate) fn load_context(
    manifest_flag: Option<PathBuf>,
    document_flag: Option<PathBuf>,
) -> Result<RunContext> {
    let manifest_path = match manifest_flag {
        Some(path) => path,
        None => find_manifest()?,
    };
    let manifest = Manifest::load(&manifest_path)?;
    let document_path =
        document_flag.unwrap_or_else(|| manifest.document_path(&manifest_path));

    Ok(RunContext {
        manifest,
        manifest_path,
        document_path,
    })
}
