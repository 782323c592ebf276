//! Plugin requirement modelling and version ordering

pub mod requirement;
pub mod version;

pub use requirement::{PluginRequirement, RequirementSet};
