//! Reconciliation of declared requirements against the persisted document
//!
//! One pass merges the freshly resolved (plugin, min-version) pairs with
//! whatever the document already records, then decides whether the document
//! needs to be written, deleted or left alone. The merge is monotonic: a
//! recorded minimum is never lowered, and entries this tool does not manage
//! in the current pass are preserved.

use std::cmp::Ordering;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::dependency::version::compare_versions;
use crate::dependency::RequirementSet;
use crate::document::PluginEntry;
use crate::error::ExtdepsError;

/// What the document store found on disk before the pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExistingState {
    /// No document at the path
    Absent,
    /// Document decoded successfully into plugin entries
    Decoded(Vec<PluginEntry>),
    /// Document present but unusable: unparseable XML, missing the
    /// ExternalDependencies component, or corrupt version data
    Malformed,
}

/// What the caller should do with the document after the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Write,
    Delete,
    Noop,
}

/// Result of one reconciliation pass.
#[derive(Debug)]
pub struct Reconciliation {
    /// Merged entries, sorted by id ascending
    pub entries: Vec<PluginEntry>,
    pub disposition: Disposition,
    /// Advisory messages for the caller to surface (never fatal)
    pub warnings: Vec<String>,
}

/// Run one reconciliation pass.
///
/// An empty requirement set means this tool no longer manages any plugin, so
/// any previously written document is deleted rather than left stale. A
/// malformed existing document is not fatal: it is rebuilt from the declared
/// requirements alone, with a warning the caller can print.
pub fn reconcile(
    requirements: &RequirementSet,
    existing: ExistingState,
) -> Result<Reconciliation, ExtdepsError> {
    let mut warnings = Vec::new();

    if existing == ExistingState::Malformed {
        warnings.push(
            "existing document does not contain a usable ExternalDependencies component; \
             rebuilding it from declared requirements"
                .to_string(),
        );
    }

    if requirements.is_empty() {
        let disposition = match existing {
            ExistingState::Absent => Disposition::Noop,
            _ => Disposition::Delete,
        };
        return Ok(Reconciliation {
            entries: Vec::new(),
            disposition,
            warnings,
        });
    }

    let baseline = match existing {
        ExistingState::Decoded(entries) => entries,
        _ => Vec::new(),
    };

    // BTreeMap keyed by id gives the required ordinal id-ascending output
    // order regardless of input iteration order.
    let mut merged: BTreeMap<String, PluginEntry> = BTreeMap::new();
    for entry in baseline {
        merged.insert(entry.id.clone(), entry);
    }

    for requirement in requirements.iter() {
        let incoming = PluginEntry::new(requirement.name(), requirement.effective_min_version()?);
        match merged.entry(incoming.id.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(incoming);
            }
            Entry::Occupied(mut slot) => {
                if !keep_existing(slot.get(), &incoming, &mut warnings) {
                    slot.insert(incoming);
                }
            }
        }
    }

    Ok(Reconciliation {
        entries: merged.into_values().collect(),
        disposition: Disposition::Write,
        warnings,
    })
}

/// Monotonic per-id merge: never lower a recorded minimum.
fn keep_existing(existing: &PluginEntry, incoming: &PluginEntry, warnings: &mut Vec<String>) -> bool {
    match (&existing.min_version, &incoming.min_version) {
        (None, None) => true,
        (Some(_), None) => true,
        (None, Some(_)) => false,
        (Some(recorded), Some(resolved)) => match compare_versions(recorded, resolved) {
            Ok(Ordering::Less) => false,
            Ok(_) => true,
            Err(_) => {
                // The incoming version was validated at ingestion, so the
                // recorded one is corrupt and cannot anchor the merge.
                warnings.push(format!(
                    "replacing malformed recorded min-version '{}' for plugin '{}'",
                    recorded, existing.id
                ));
                false
            }
        },
    }
}
