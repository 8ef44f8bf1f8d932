//! File comparison and duplicate decisions
//!
//! This module provides read-only analysis of a path-identical file pair:
//! - Content digests via streamed SHA-256 hashing
//! - Size and modification time snapshots
//! - The [`EqualityOracle`] combining both under a [`Policy`](crate::config::Policy)

mod hash;
mod oracle;
mod stamp;

use std::fmt;

pub use hash::{ContentHasher, FileHash};
pub use oracle::EqualityOracle;
pub use stamp::FileStamp;

/// Rule that authorised deleting a candidate file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeleteRule {
    /// Same relative path, `forceDeleteByName` set
    ByName,
    /// Same relative path, extension force-listed
    ByExtension,
    /// Identical content digest
    ByHash,
    /// Candidate both strictly older and strictly smaller
    BySizeAndAge,
    /// Reserved cache-marker file, removed unconditionally
    CacheMarker,
}

impl DeleteRule {
    /// Short label used in logs and summaries
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ByName => "by name",
            Self::ByExtension => "by extension",
            Self::ByHash => "by hash",
            Self::BySizeAndAge => "smaller and older",
            Self::CacheMarker => "cache marker",
        }
    }
}

impl fmt::Display for DeleteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of the equality oracle for one file pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Delete the candidate copy
    Delete(DeleteRule),
    /// Keep both copies; content differs and the policy does not authorise deletion
    Keep,
    /// Forced rules did not apply; content must be inspected
    NeedsContentCheck,
}
