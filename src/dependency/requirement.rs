//! Plugin requirements and effective minimum version resolution

use std::collections::BTreeMap;

use crate::dependency::version::DottedVersion;
use crate::error::ExtdepsError;

/// A named plugin requirement accumulating minimum-version constraints.
///
/// Multiple call sites may each ask for their own minimum; only the highest
/// one matters, so candidates are appended without deduplication and the
/// effective minimum is resolved once at reconciliation time.
#[derive(Debug, Clone)]
pub struct PluginRequirement {
    name: String,
    required_min_versions: Vec<String>,
}

impl PluginRequirement {
    /// Create a requirement with no version constraints yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required_min_versions: Vec::new(),
        }
    }

    /// The plugin identifier, e.g. "org.jetbrains.kotlin".
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record one more candidate minimum version.
    pub fn at_least_version(&mut self, version: impl Into<String>) {
        self.required_min_versions.push(version.into());
    }

    /// Resolve the single effective minimum: the maximum of all candidates
    /// under the dotted-numeric order, or `None` when no candidate was ever
    /// recorded. When candidates compare equal (e.g. "1.0" and "1.0.0"),
    /// whichever textual form was seen first is kept.
    pub fn effective_min_version(&self) -> Result<Option<String>, ExtdepsError> {
        let mut best: Option<(DottedVersion, &str)> = None;

        for candidate in &self.required_min_versions {
            let parsed = DottedVersion::parse(candidate)?;
            match &best {
                Some((current, _)) if parsed <= *current => {}
                _ => best = Some((parsed, candidate)),
            }
        }

        Ok(best.map(|(_, text)| text.to_string()))
    }
}

/// The full set of requirements for one reconciliation pass, keyed by plugin
/// name. This is the single aggregation point: all candidates are collected
/// here before the reconciliation engine ever observes the set.
#[derive(Debug, Clone, Default)]
pub struct RequirementSet {
    requirements: BTreeMap<String, PluginRequirement>,
}

impl RequirementSet {
    /// Create an empty requirement set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a plugin is tracked, without constraining its version.
    pub fn track(&mut self, name: &str) -> &mut PluginRequirement {
        self.requirements
            .entry(name.to_string())
            .or_insert_with(|| PluginRequirement::new(name))
    }

    /// Add one minimum-version constraint for a plugin.
    pub fn require(&mut self, name: &str, version: impl Into<String>) {
        self.track(name).at_least_version(version);
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    /// Iterate requirements in name order.
    pub fn iter(&self) -> impl Iterator<Item = &PluginRequirement> {
        self.requirements.values()
    }
}
