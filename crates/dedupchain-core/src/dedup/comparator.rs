//! Lock-step comparison of a reference tree against a candidate tree

use std::path::{Path, PathBuf};

use anyhow::Context;
use rayon::prelude::*;

use super::actions::{DedupAction, DedupActionResolver};
use super::cancel::CancelToken;
use super::executor::DeletionExecutor;
use super::DedupResult;
use crate::comparison::{EqualityOracle, Verdict};
use crate::config::Policy;
use crate::error::{ConfigError, Result};
use crate::scanner::{EntryFilter, Scanner};

/// Walks the reference tree and cleans path-identical duplicates from the candidate
///
/// Only files present at the same relative path on both sides are touched,
/// and only on the candidate side. Counterparts are located by joining the
/// relative path onto the candidate root.
pub struct TreeComparator<'a> {
    policy: &'a Policy,
    oracle: EqualityOracle<'a>,
    scanner: Scanner,
    executor: DeletionExecutor,
    cancel: CancelToken,
}

impl<'a> TreeComparator<'a> {
    /// Create a comparator
    #[must_use]
    pub fn new(policy: &'a Policy, executor: DeletionExecutor, cancel: CancelToken) -> Self {
        Self {
            policy,
            oracle: EqualityOracle::new(policy),
            scanner: Scanner::new(EntryFilter::new(policy.include_hidden)),
            executor,
            cancel,
        }
    }

    /// Compare `reference_root` against `candidate_root`, deleting duplicates
    ///
    /// Per-entry failures are recorded in the result and the walk continues.
    /// An unreadable directory aborts descent into that subtree only.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either root is not an existing directory,
    /// if both resolve to the same directory, or if one contains the other.
    pub fn compare(&self, reference_root: &Path, candidate_root: &Path) -> Result<DedupResult> {
        check_roots(reference_root, candidate_root)?;

        let mut result = DedupResult::default();
        // walkdir reports a directory it cannot descend into after yielding
        // it, so a listing failure already recorded must not be counted twice
        let mut unlisted: Option<PathBuf> = None;

        for entry in self.scanner.directories(reference_root) {
            if self.cancel.is_cancelled() {
                log::warn!("Cancelled while comparing {}", candidate_root.display());
                result.cancelled = true;
                break;
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    if e.path().is_some() && e.path() == unlisted.as_deref() {
                        log::trace!("Already reported: {e}");
                    } else {
                        result.record_error(
                            &anyhow::Error::new(e).context("Failed to walk reference tree"),
                        );
                    }
                    continue;
                }
            };

            if entry.depth() == 0 && !self.policy.compare_root_files {
                continue;
            }

            let relative = entry.path().strip_prefix(reference_root).with_context(|| {
                format!("Failed to strip prefix from {}", entry.path().display())
            })?;
            let candidate_dir = candidate_root.join(relative);

            if !candidate_dir.is_dir() {
                log::trace!("No counterpart for {}", entry.path().display());
                continue;
            }

            log::debug!("Comparing directory {}", entry.path().display());
            if let Err(e) = self.compare_directory(entry.path(), &candidate_dir, &mut result) {
                result.record_error(&e);
                unlisted = Some(entry.path().to_path_buf());
            }
        }

        Ok(result)
    }

    /// Compare the files directly inside one matched directory pair
    ///
    /// Per-file failures go into `result`; only a failure to list
    /// `reference_dir` is returned.
    fn compare_directory(
        &self,
        reference_dir: &Path,
        candidate_dir: &Path,
        result: &mut DedupResult,
    ) -> Result<()> {
        if self.policy.remove_cache_files {
            let marker = candidate_dir.join(&self.policy.cache_marker);
            if marker.is_file() {
                self.apply(&DedupAction::RemoveCacheMarker { path: marker }, result);
            }
        }

        let names = self.scanner.files(reference_dir)?;

        let pairs: Vec<(PathBuf, PathBuf)> = names
            .iter()
            .map(|name| (reference_dir.join(name), candidate_dir.join(name)))
            .filter(|(_, candidate)| candidate.is_file())
            .collect();

        let verdicts = self.decide_all(&pairs);

        for ((reference, candidate), verdict) in pairs.into_iter().zip(verdicts) {
            match verdict {
                Ok(verdict) => {
                    let action = DedupActionResolver::resolve(reference, candidate, verdict);
                    self.apply(&action, result);
                }
                Err(e) => result.record_error(&e.context(format!(
                    "Failed to compare {} with {}",
                    candidate.display(),
                    reference.display()
                ))),
            }
        }

        Ok(())
    }

    /// Run the oracle on every pair, in listing order
    ///
    /// Reading is parallel when the policy allows it; deletions are applied
    /// by the caller afterwards, one at a time.
    fn decide_all(&self, pairs: &[(PathBuf, PathBuf)]) -> Vec<Result<Verdict>> {
        if self.policy.parallel_hashing && pairs.len() > 1 {
            pairs
                .par_iter()
                .map(|(reference, candidate)| self.oracle.decide(reference, candidate))
                .collect()
        } else {
            pairs
                .iter()
                .map(|(reference, candidate)| self.oracle.decide(reference, candidate))
                .collect()
        }
    }

    fn apply(&self, action: &DedupAction, result: &mut DedupResult) {
        if let Err(e) = self.executor.execute(action, result) {
            result.record_error(&e);
        }
    }
}

/// Refuse to start on missing, identical or nested roots
fn check_roots(reference: &Path, candidate: &Path) -> Result<()> {
    for root in [reference, candidate] {
        if !root.is_dir() {
            return Err(ConfigError::NotADirectory(root.to_path_buf()).into());
        }
    }

    let reference_real = dunce::canonicalize(reference)
        .with_context(|| format!("Failed to resolve {}", reference.display()))?;
    let candidate_real = dunce::canonicalize(candidate)
        .with_context(|| format!("Failed to resolve {}", candidate.display()))?;

    if reference_real == candidate_real {
        return Err(ConfigError::SamePath(reference.to_path_buf()).into());
    }

    if reference_real.starts_with(&candidate_real) || candidate_real.starts_with(&reference_real) {
        return Err(ConfigError::NestedTrees {
            reference: reference.to_path_buf(),
            candidate: candidate.to_path_buf(),
        }
        .into());
    }

    Ok(())
}
