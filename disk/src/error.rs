//! Error types for disk image operations

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type for disk image operations
pub type Result<T> = std::result::Result<T, DiskError>;

/// Errors that can occur while assembling or extracting disk images
#[derive(Debug)]
pub enum DiskError {
    /// Source file missing for a copy operation
    NotFound {
        /// Path that could not be opened
        path: PathBuf,
    },

    /// Input file larger than its destination section's capacity
    SizeExceeded {
        /// The offending input file
        path: PathBuf,
        /// Capacity of the destination section in bytes
        limit: u64,
    },

    /// Read/write byte-count mismatch during a block copy
    CopyMismatch {
        /// Bytes read from the source for the chunk
        read: usize,
        /// Bytes actually written to the destination
        written: usize,
    },

    /// Malformed version string
    InvalidVersion {
        /// The string that failed to parse
        input: String,
    },

    /// Malformed or inconsistent sector map
    InvalidSectorMap {
        /// What was wrong with the map
        detail: String,
    },

    /// Underlying I/O failure
    Io(io::Error),
}

impl fmt::Display for DiskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => {
                write!(f, "Source file '{}' not found.", path.display())
            }
            Self::SizeExceeded { path, limit } => {
                write!(
                    f,
                    "The size of '{}' exceeds the maximum size of {}.",
                    path.display(),
                    limit
                )
            }
            Self::CopyMismatch { read, written } => {
                write!(f, "Copy error: read {read} bytes but only wrote out {written}.")
            }
            Self::InvalidVersion { input } => {
                write!(f, "Version is not in a correct format: '{input}'")
            }
            Self::InvalidSectorMap { detail } => {
                write!(f, "Invalid sector map: {detail}")
            }
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for DiskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for DiskError {
    fn from(err: io::Error) -> Self {
        DiskError::Io(err)
    }
}
