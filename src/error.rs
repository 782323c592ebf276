//! Error types and helpers for user-friendly error messages

use std::path::PathBuf;

use thiserror::Error;

/// Custom error types with helpful context and suggestions
#[derive(Error, Debug)]
pub enum ExtdepsError {
    /// A version string does not parse as dot-separated non-negative integers
    #[error("Malformed version '{value}': expected dot-separated non-negative integers")]
    MalformedVersion { value: String },

    /// Manifest (extdeps.toml) errors
    #[error("Manifest error: {message}")]
    Manifest {
        message: String,
        hint: Option<String>,
    },

    /// Read, write or delete failure against the persisted document
    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExtdepsError {
    /// Create a manifest error without a hint
    pub fn manifest_error(message: impl Into<String>) -> Self {
        Self::Manifest {
            message: message.into(),
            hint: None,
        }
    }

    /// Create a manifest error with a hint
    pub fn manifest_error_with_hint(
        message: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self::Manifest {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an I/O error tied to a document path
    pub fn io_error(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("\n{} {}", style("ERROR:").red().bold(), self);

        match self {
            ExtdepsError::Manifest { hint: Some(h), .. } => {
                eprintln!("\n{} {}", style("HINT:").yellow().bold(), h);
            }
            ExtdepsError::MalformedVersion { .. } => {
                eprintln!(
                    "\n{} {}",
                    style("HINT:").yellow().bold(),
                    "Versions look like \"2024.1\" or \"233.11799.300\": dot-separated numbers only."
                );
            }
            _ => {}
        }

        eprintln!();
    }
}

/// Common error hints
pub mod hints {
    /// Get hint for extdeps.toml not found
    pub fn manifest_not_found() -> &'static str {
        "Could not find extdeps.toml in current directory or any parent directory.\n\
         \n\
         Create one next to your .idea directory, for example:\n\
         \n\
         [plugins]\n\
         \"org.jetbrains.kotlin\" = \"1.9.0\""
    }

    /// Get hint for invalid extdeps.toml
    pub fn invalid_manifest() -> &'static str {
        "extdeps.toml is invalid. Common issues:\n\
         • Invalid TOML syntax (check quotes, brackets, commas)\n\
         • Plugin versions must be strings or arrays of strings\n\
         • Version strings must be dot-separated numbers like \"233.11799\""
    }
}
