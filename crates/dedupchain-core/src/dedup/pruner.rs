//! Bottom-up removal of directories left empty after deduplication

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::DedupResult;
use super::executor::DeletionExecutor;
use crate::error::Result;

/// Removes empty directories from a candidate tree
///
/// A directory is removed when, after its children were pruned, it holds no
/// entries or only the cache-marker file. Hidden entries count as content.
/// Symlinks to directories are entries, never descended into.
pub struct EmptyDirPruner<'a> {
    cache_marker: &'a str,
    executor: DeletionExecutor,
}

impl<'a> EmptyDirPruner<'a> {
    /// Create a pruner
    #[must_use]
    pub const fn new(cache_marker: &'a str, executor: DeletionExecutor) -> Self {
        Self {
            cache_marker,
            executor,
        }
    }

    /// Prune `dir` and everything beneath it; `dir` itself may be removed
    ///
    /// Failures are recorded in `result` and do not stop the pass.
    pub fn prune(&self, dir: &Path, result: &mut DedupResult) {
        if !dir.is_dir() {
            return;
        }
        self.prune_dir(dir, result);
    }

    fn prune_dir(&self, dir: &Path, result: &mut DedupResult) {
        let children = match list_entries(dir) {
            Ok(entries) => entries,
            Err(e) => {
                result.record_error(&e);
                return;
            }
        };

        for (path, is_dir) in &children {
            if *is_dir {
                self.prune_dir(path, result);
            }
        }

        let remaining = match list_entries(dir) {
            Ok(entries) => entries,
            Err(e) => {
                result.record_error(&e);
                return;
            }
        };

        let outcome = match remaining.as_slice() {
            [] => self.executor.remove_dir(dir, None, result),
            [(only, false)] if only.file_name() == Some(OsStr::new(self.cache_marker)) => {
                self.executor.remove_dir(dir, Some(only.as_path()), result)
            }
            _ => Ok(()),
        };

        if let Err(e) = outcome {
            result.record_error(&e);
        }
    }
}

/// Entries of `dir` as `(path, is_directory)`, sorted by name
fn list_entries(dir: &Path) -> Result<Vec<(PathBuf, bool)>> {
    let mut entries: Vec<(OsString, PathBuf, bool)> = Vec::new();

    for entry in
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let entry = entry.with_context(|| format!("Failed to read entry in: {}", dir.display()))?;
        let file_type = entry
            .file_type()
            .with_context(|| format!("Failed to read file type: {}", entry.path().display()))?;
        entries.push((entry.file_name(), entry.path(), file_type.is_dir()));
    }

    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries
        .into_iter()
        .map(|(_, path, is_dir)| (path, is_dir))
        .collect())
}
