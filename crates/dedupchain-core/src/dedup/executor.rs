//! Deletion executor
//!
//! Every deletion happens here, immediately after its verdict. Nothing is
//! buffered, so an interrupted run leaves only independently valid deletions.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;

use super::DedupResult;
use super::actions::DedupAction;
use crate::comparison::DeleteRule;
use crate::error::Result;

/// Executes dedup actions against the candidate tree
#[derive(Debug, Clone, Copy)]
pub struct DeletionExecutor {
    dry_run: bool,
}

impl DeletionExecutor {
    /// Create a new executor
    #[must_use]
    pub const fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Whether this executor only reports
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Execute a dedup action
    ///
    /// # Errors
    ///
    /// Returns an error if a deletion fails.
    pub fn execute(&self, action: &DedupAction, result: &mut DedupResult) -> Result<()> {
        match action {
            DedupAction::Delete {
                reference,
                candidate,
                rule,
            } => {
                if self.dry_run {
                    log::info!(
                        "[DRY RUN] Would delete ({rule}): {} (duplicate of {})",
                        candidate.display(),
                        reference.display()
                    );
                } else if Self::remove_file(candidate)? {
                    log::info!(
                        "Deleted ({rule}): {} (duplicate of {})",
                        candidate.display(),
                        reference.display()
                    );
                } else {
                    return Ok(());
                }
                result.record_deletion(*rule);
            }
            DedupAction::RemoveCacheMarker { path } => {
                if self.dry_run {
                    log::info!("[DRY RUN] Would delete cache marker: {}", path.display());
                } else if Self::remove_file(path)? {
                    log::info!("Deleted cache marker: {}", path.display());
                } else {
                    return Ok(());
                }
                result.record_deletion(DeleteRule::CacheMarker);
            }
            DedupAction::KeepConflict {
                reference,
                candidate,
            } => {
                log::warn!(
                    "Content differs, both kept:\n    {}\n    {}",
                    reference.display(),
                    candidate.display()
                );
                result.record_conflict(reference.clone(), candidate.clone());
            }
        }
        Ok(())
    }

    /// Remove an empty directory, together with its lone cache marker if given
    ///
    /// # Errors
    ///
    /// Returns an error if the marker or the directory cannot be removed.
    pub fn remove_dir(
        &self,
        dir: &Path,
        marker: Option<&Path>,
        result: &mut DedupResult,
    ) -> Result<()> {
        if self.dry_run {
            log::info!("[DRY RUN] Would remove empty directory: {}", dir.display());
        } else {
            if let Some(marker) = marker {
                Self::remove_file(marker)?;
            }
            fs::remove_dir(dir)
                .with_context(|| format!("Failed to remove directory: {}", dir.display()))?;
            log::info!("Removed empty directory: {}", dir.display());
        }
        result.pruned.push(dir.to_path_buf());
        Ok(())
    }

    /// Delete a file; `Ok(false)` when it was already gone
    fn remove_file(path: &Path) -> Result<bool> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Already deleted: {}", path.display());
                Ok(false)
            }
            Err(e) => Err(e).with_context(|| format!("Failed to delete: {}", path.display())),
        }
    }
}
