//! Directory listing for the tree comparator
//!
//! Listings are sorted by file name so a run is reproducible. Hidden
//! directories rejected by the [`EntryFilter`] are never descended into.

mod filters;

use std::ffi::OsString;
use std::fs;
use std::path::Path;

use anyhow::Context;
use walkdir::{DirEntry, WalkDir};

pub use filters::{EntryFilter, is_hidden};

use crate::error::Result;

/// Lists directories and files, honouring the hidden-entry filter
#[derive(Debug, Clone, Copy, Default)]
pub struct Scanner {
    filter: EntryFilter,
}

impl Scanner {
    /// Create a new scanner with the given filter
    #[must_use]
    pub const fn new(filter: EntryFilter) -> Self {
        Self { filter }
    }

    /// Walk every directory under `root` top-down, `root` itself first
    ///
    /// Rejected directories are filtered out before descent, so nothing
    /// beneath them is yielded. An unreadable directory yields an `Err` and
    /// the walk carries on with its siblings. Symlinks are not followed.
    pub fn directories(&self, root: &Path) -> impl Iterator<Item = walkdir::Result<DirEntry>> {
        let filter = self.filter;

        WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| entry.depth() == 0 || filter.allows(entry.file_name()))
            .filter(|entry| entry.as_ref().map_or(true, |e| e.file_type().is_dir()))
    }

    /// Names of the regular files directly inside `dir`, sorted
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    pub fn files(&self, dir: &Path) -> Result<Vec<OsString>> {
        let mut names = Vec::new();

        for entry in fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?
        {
            let entry =
                entry.with_context(|| format!("Failed to read entry in: {}", dir.display()))?;
            let name = entry.file_name();

            if self.filter.allows(&name) && entry.path().is_file() {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }
}
