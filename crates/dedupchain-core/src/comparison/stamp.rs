//! Size and modification time snapshot for the smaller-and-older rule

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use anyhow::Context;

use crate::error::Result;

/// Size and modification time of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStamp {
    /// Last modification time
    pub modified: SystemTime,
    /// Length in bytes
    pub size: u64,
}

impl FileStamp {
    /// Read the stamp of a file
    ///
    /// # Errors
    ///
    /// Returns an error if file metadata cannot be read.
    pub fn read(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to read metadata for: {}", path.display()))?;

        let modified = metadata
            .modified()
            .with_context(|| format!("Failed to get modification time for: {}", path.display()))?;

        Ok(Self {
            modified,
            size: metadata.len(),
        })
    }

    /// Whether `self` is both strictly older and strictly smaller than `other`
    ///
    /// Winning on one dimension only is not enough.
    #[must_use]
    pub fn is_older_and_smaller_than(&self, other: &Self) -> bool {
        self.modified < other.modified && self.size < other.size
    }
}
