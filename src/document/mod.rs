//! Persisted document model and store for externalDependencies.xml

pub mod store;
pub mod xml;

pub use store::DocumentStore;

/// One `<plugin/>` element inside the ExternalDependencies component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginEntry {
    /// Plugin identifier, e.g. "org.jetbrains.kotlin"
    pub id: String,

    /// Resolved minimum version; the min-version attribute is omitted from
    /// the document when this is `None`
    pub min_version: Option<String>,
}

impl PluginEntry {
    pub fn new(id: impl Into<String>, min_version: Option<String>) -> Self {
        Self {
            id: id.into(),
            min_version,
        }
    }
}
