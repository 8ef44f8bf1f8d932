//! Error taxonomy
//!
//! Everything fallible returns [`Result`]. Fatal configuration problems are
//! raised as a [`ConfigError`] inside the `anyhow::Error` so callers can
//! tell them apart from unexpected failures by downcasting.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `anyhow::Error`
pub type Result<T> = anyhow::Result<T>;

/// Fatal configuration errors; they abort the affected run only
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reference and candidate resolve to the same directory
    #[error("reference and candidate are the same directory: {}", .0.display())]
    SamePath(PathBuf),

    /// A tree root is missing or is not a directory
    #[error("not an existing directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// One tree lies inside the other, so deleting from the candidate would mutate the reference
    #[error("trees are nested: {} and {}", reference.display(), candidate.display())]
    NestedTrees {
        /// Reference tree root
        reference: PathBuf,
        /// Candidate tree root
        candidate: PathBuf,
    },

    /// A configuration file could not be read
    #[error("failed to read configuration {}", path.display())]
    Read {
        /// Configuration file path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// A configuration file could not be parsed
    #[error("failed to parse configuration {}: {message}", path.display())]
    Parse {
        /// Configuration file path
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// A configuration is syntactically valid but not usable
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// A batch list file could not be read
    #[error("failed to read job list {}", path.display())]
    ListFile {
        /// List file path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

/// Whether `err` carries a [`ConfigError`] anywhere in its chain
#[must_use]
pub fn is_config_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| cause.is::<ConfigError>())
}
