//! Priority-chain deduplication engine
//!
//! This module walks reference/candidate tree pairs, deletes duplicates from
//! the candidate immediately as verdicts come in, prunes the directories
//! left empty, and schedules pairs so earlier trees arbitrate later ones.

mod actions;
mod cancel;
mod comparator;
mod executor;
mod orchestrator;
mod pruner;
mod reporting;

#[cfg(test)]
mod integration_tests;

use std::collections::BTreeMap;
use std::path::PathBuf;

pub use actions::{DedupAction, DedupActionResolver};
pub use cancel::CancelToken;
pub use comparator::TreeComparator;
pub use executor::DeletionExecutor;
pub use orchestrator::{ChainReport, DedupEngine, PairReport};
pub use pruner::EmptyDirPruner;
pub use reporting::DedupReporter;

use crate::comparison::DeleteRule;

/// Two path-identical files with different content, both kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictPair {
    /// File in the reference tree
    pub reference: PathBuf,
    /// File in the candidate tree
    pub candidate: PathBuf,
}

/// Dedup result with statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupResult {
    /// Files deleted from the candidate tree
    pub deleted: usize,
    /// Deletions per deciding rule
    pub delete_reasons: BTreeMap<DeleteRule, usize>,
    /// Differing pairs kept on both sides
    pub conflicts: Vec<ConflictPair>,
    /// Per-entry errors, with context
    pub errors: Vec<String>,
    /// Directories removed by the pruner, in removal order
    pub pruned: Vec<PathBuf>,
    /// Whether the run stopped early on cancellation
    pub cancelled: bool,
}

impl DedupResult {
    /// Deletions decided by `rule`
    #[must_use]
    pub fn deleted_by(&self, rule: DeleteRule) -> usize {
        self.delete_reasons.get(&rule).copied().unwrap_or(0)
    }

    /// Whether the run finished without per-entry errors
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Fold another result into this one
    pub fn merge(&mut self, other: Self) {
        self.deleted += other.deleted;
        for (rule, count) in other.delete_reasons {
            *self.delete_reasons.entry(rule).or_insert(0) += count;
        }
        self.conflicts.extend(other.conflicts);
        self.errors.extend(other.errors);
        self.pruned.extend(other.pruned);
        self.cancelled |= other.cancelled;
    }

    pub(crate) fn record_deletion(&mut self, rule: DeleteRule) {
        self.deleted += 1;
        *self.delete_reasons.entry(rule).or_insert(0) += 1;
    }

    pub(crate) fn record_conflict(&mut self, reference: PathBuf, candidate: PathBuf) {
        self.conflicts.push(ConflictPair {
            reference,
            candidate,
        });
    }

    pub(crate) fn record_error(&mut self, err: &anyhow::Error) {
        let message = format!("{err:#}");
        log::warn!("Error: {message}");
        self.errors.push(message);
    }
}
