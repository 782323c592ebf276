//! Filesystem-backed store for the externalDependencies.xml document

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Result;

use crate::document::{xml, PluginEntry};
use crate::error::ExtdepsError;
use crate::reconcile::ExistingState;
use crate::utils::paths::ensure_dir;

/// Loads and saves the persisted document at one path.
///
/// Read and write failures are hard errors; a document that exists but
/// cannot be decoded is reported as `ExistingState::Malformed` so the
/// reconciliation pass can rebuild it instead of aborting the run.
pub struct DocumentStore {
    path: PathBuf,
}

impl DocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Raw text currently on disk, or `None` when the document is absent.
    pub fn current_text(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ExtdepsError::io_error("read", &self.path, e).into()),
        }
    }

    /// Load the current state of the document.
    pub fn load(&self) -> Result<ExistingState> {
        let text = match self.current_text()? {
            Some(text) => text,
            None => return Ok(ExistingState::Absent),
        };

        match xml::decode(&text) {
            Ok(Some(entries)) => Ok(ExistingState::Decoded(entries)),
            Ok(None) => Ok(ExistingState::Malformed),
            Err(_) => Ok(ExistingState::Malformed),
        }
    }

    /// Render the document bytes a write would produce, splicing the entries
    /// into the current file when one exists and is usable.
    pub fn render(&self, entries: &[PluginEntry]) -> Result<String> {
        let rendered = match self.current_text()? {
            // A document we cannot splice into (unparseable, no root) gets
            // replaced by the minimal fresh document; the reconciliation
            // pass has already warned about it.
            Some(text) => {
                xml::splice(&text, entries).or_else(|_| xml::render_fresh(entries))?
            }
            None => xml::render_fresh(entries)?,
        };

        Ok(rendered)
    }

    /// Write the merged entries back to the document.
    pub fn write(&self, entries: &[PluginEntry]) -> Result<()> {
        let rendered = self.render(entries)?;

        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        fs::write(&self.path, rendered)
            .map_err(|e| ExtdepsError::io_error("write", &self.path, e))?;
        Ok(())
    }

    /// Remove the document. Succeeds silently when it does not exist.
    pub fn delete(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ExtdepsError::io_error("remove", &self.path, e).into()),
        }
    }
}
