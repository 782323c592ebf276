//! extdeps.toml manifest parsing
//!
//! The manifest declares which plugins a project requires and, per plugin,
//! any number of minimum-version constraints. Example:
//!
//! ```toml
//! [document]
//! path = ".idea/externalDependencies.xml"
//!
//! [plugins]
//! "org.jetbrains.kotlin" = "1.9.0"
//! "palantir-java-format" = { at-least = ["2.39.0", "2.50.0"] }
//! "com.example.tracked" = { }
//! ```
//!
//! The shorthand form declares a single minimum. The `at-least` array form
//! collects constraints from several sources; only the highest one ends up in
//! the document. An empty table tracks a plugin without constraining its
//! version.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::dependency::version::DottedVersion;
use crate::dependency::RequirementSet;
use crate::error::{hints, ExtdepsError};

/// File name looked up in the current directory and its parents.
pub const MANIFEST_FILE_NAME: &str = "extdeps.toml";

/// Default document path, relative to the manifest.
pub const DEFAULT_DOCUMENT_PATH: &str = ".idea/externalDependencies.xml";

/// Root configuration from extdeps.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Persisted document settings
    #[serde(default)]
    pub document: DocumentConfig,

    /// Declared plugin requirements, keyed by plugin id
    #[serde(default)]
    pub plugins: BTreeMap<String, PluginSpec>,
}

/// Settings from the [document] section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentConfig {
    /// Document path, resolved relative to the manifest when not absolute
    pub path: Option<PathBuf>,
}

/// One plugin declaration: shorthand version string or detailed table
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PluginSpec {
    /// `name = "1.2.3"`
    MinVersion(String),

    /// `name = { at-least = ["1.2", "1.10"] }`
    Detailed {
        #[serde(default, rename = "at-least")]
        at_least: VersionList,
    },
}

impl PluginSpec {
    /// All declared minimum-version candidates for this plugin.
    pub fn versions(&self) -> &[String] {
        match self {
            Self::MinVersion(version) => std::slice::from_ref(version),
            Self::Detailed { at_least } => at_least.as_slice(),
        }
    }
}

/// A single version string or an array of them
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum VersionList {
    One(String),
    Many(Vec<String>),
}

impl VersionList {
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::One(version) => std::slice::from_ref(version),
            Self::Many(versions) => versions,
        }
    }
}

impl Default for VersionList {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl Manifest {
    /// Load and validate a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        let manifest: Manifest = toml::from_str(&text).map_err(|e| {
            ExtdepsError::manifest_error_with_hint(
                format!("{}: {}", path.display(), e.message()),
                hints::invalid_manifest(),
            )
        })?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Validate declared plugin names and version strings. Malformed versions
    /// are rejected here, at ingestion, rather than surfacing later from the
    /// reconciliation pass.
    fn validate(&self) -> Result<()> {
        for (name, spec) in &self.plugins {
            if name.trim().is_empty() {
                return Err(ExtdepsError::manifest_error(
                    "plugin with an empty name declared in [plugins]",
                )
                .into());
            }
            for version in spec.versions() {
                DottedVersion::parse(version).map_err(|_| {
                    ExtdepsError::manifest_error_with_hint(
                        format!("plugin '{}' declares malformed version '{}'", name, version),
                        "Versions must be dot-separated non-negative integers, like \"233.11799\" or \"2024.1\"",
                    )
                })?;
            }
        }
        Ok(())
    }

    /// Aggregate all declared constraints into the requirement set handed to
    /// the reconciliation pass.
    pub fn requirements(&self) -> RequirementSet {
        let mut set = RequirementSet::new();
        for (name, spec) in &self.plugins {
            set.track(name);
            for version in spec.versions() {
                set.require(name, version);
            }
        }
        set
    }

    /// Resolve the document path against the manifest location.
    pub fn document_path(&self, manifest_path: &Path) -> PathBuf {
        let configured = self
            .document
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DOCUMENT_PATH));

        if configured.is_absolute() {
            configured
        } else {
            manifest_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(configured)
        }
    }
}
