//! Path utilities for the extdeps CLI

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::manifest::MANIFEST_FILE_NAME;
use crate::error::{hints, ExtdepsError};

/// Find the manifest by looking for extdeps.toml upward from the current
/// directory.
pub fn find_manifest() -> Result<PathBuf> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    find_manifest_from(&current_dir)
}

/// Find the manifest starting from a specific directory.
pub fn find_manifest_from(start: &Path) -> Result<PathBuf> {
    let mut dir = start;
    loop {
        let candidate = dir.join(MANIFEST_FILE_NAME);
        if candidate.is_file() {
            return Ok(candidate);
        }

        match dir.parent() {
            Some(parent) => dir = parent,
            None => {
                return Err(ExtdepsError::manifest_error_with_hint(
                    format!(
                        "could not find {} in {} or any parent directory",
                        MANIFEST_FILE_NAME,
                        start.display()
                    ),
                    hints::manifest_not_found(),
                )
                .into())
            }
        }
    }
}

/// Ensure a directory exists
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() && !path.as_os_str().is_empty() {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}
