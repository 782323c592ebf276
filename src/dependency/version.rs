//! Dotted-numeric version parsing and ordering
//!
//! IntelliJ plugin minimum versions are plain dot-separated integers
//! (e.g. "2024.1" or "233.11799.300"), not semver: there is no pre-release
//! or build metadata. Comparison is numeric token by token, with the
//! shorter version padded with zeros, so "1" == "1.0.0" and "2.10" > "2.9".

use std::cmp::Ordering;
use std::fmt;

use crate::error::ExtdepsError;

/// A parsed dot-separated numeric version.
#[derive(Debug, Clone)]
pub struct DottedVersion {
    parts: Vec<u64>,
}

impl DottedVersion {
    /// Parse a version string like "1.2.3".
    ///
    /// Every token must be a non-negative integer. An empty token (leading,
    /// trailing or doubled dot) or a non-numeric token is rejected rather
    /// than silently treated as zero.
    pub fn parse(s: &str) -> Result<Self, ExtdepsError> {
        let parts = s
            .split('.')
            .map(|token| {
                token.parse::<u64>().map_err(|_| ExtdepsError::MalformedVersion {
                    value: s.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { parts })
    }
}

impl Ord for DottedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        for i in 0..len {
            let a = self.parts.get(i).copied().unwrap_or(0);
            let b = other.parts.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for DottedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Equality must agree with Ord: "1" and "1.0.0" are the same version even
// though their token vectors differ, so this cannot be derived.
impl PartialEq for DottedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DottedVersion {}

impl fmt::Display for DottedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.parts.iter().map(u64::to_string).collect();
        write!(f, "{}", rendered.join("."))
    }
}

/// Compare two version strings under the dotted-numeric order.
pub fn compare_versions(a: &str, b: &str) -> Result<Ordering, ExtdepsError> {
    Ok(DottedVersion::parse(a)?.cmp(&DottedVersion::parse(b)?))
}
