//! Batch list files enumerating job configs to run in sequence

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Comment marker for list file lines
const COMMENT_MARKER: char = '#';

/// Parser for job list files
pub struct JobList;

impl JobList {
    /// Read a list file and return the config paths it names
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ListFile`] if the list cannot be read.
    pub fn load(path: &Path) -> Result<Vec<PathBuf>> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ListFile {
            path: path.to_path_buf(),
            source,
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(Self::parse(&content, base))
    }

    /// Parse list content; blank and `#` lines are ignored
    ///
    /// Relative entries are joined onto `base`.
    #[must_use]
    pub fn parse(content: &str, base: &Path) -> Vec<PathBuf> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_MARKER))
            .map(|line| base.join(line))
            .collect()
    }
}
