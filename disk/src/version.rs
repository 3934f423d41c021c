//! Major/minor versions for the OS source tree

use crate::error::{DiskError, Result};
use std::fmt;

/// A `major.minor` version parsed from a `vX.Y` string.
///
/// Ordering is numeric on major then minor, so `v0.10` sorts after `v0.9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionInfo {
    /// Major version
    pub major: u32,
    /// Minor version
    pub minor: u32,
}

impl VersionInfo {
    /// Creates a version from its parts.
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Parses a `vX.Y` string, returning `None` when it is malformed.
    pub fn try_parse(input: &str) -> Option<Self> {
        let rest = input.strip_prefix('v')?;
        let (major, minor) = rest.split_once('.')?;
        Some(Self {
            major: major.parse().ok()?,
            minor: minor.parse().ok()?,
        })
    }

    /// Parses a `vX.Y` string, failing with the offending input.
    pub fn parse(input: &str) -> Result<Self> {
        Self::try_parse(input).ok_or_else(|| DiskError::InvalidVersion {
            input: input.to_string(),
        })
    }

    /// A copy with the minor version decremented, or `None` when the minor
    /// version is already zero.
    pub fn decrement_minor(&self) -> Option<Self> {
        let minor = self.minor.checked_sub(1)?;
        Some(Self {
            major: self.major,
            minor,
        })
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}", self.major, self.minor)
    }
}
