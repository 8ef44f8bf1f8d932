//! Priority-chain orchestration - coordinates comparator and pruner runs

use std::path::{Path, PathBuf};

use super::cancel::CancelToken;
use super::comparator::TreeComparator;
use super::executor::DeletionExecutor;
use super::pruner::EmptyDirPruner;
use super::DedupResult;
use crate::config::{ConfigValidator, JobConfig, Policy};
use crate::error::Result;

/// Outcome of one (reference, candidate) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairReport {
    /// Reference tree of the pair
    pub reference: PathBuf,
    /// Candidate tree of the pair
    pub candidate: PathBuf,
    /// What happened to the candidate tree
    pub result: DedupResult,
}

/// Outcome of a full priority-chain run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainReport {
    /// Pairs processed, in processing order
    pub pairs: Vec<PairReport>,
    /// Whether the run stopped early on cancellation
    pub cancelled: bool,
}

impl ChainReport {
    /// Aggregate result across all pairs
    #[must_use]
    pub fn total(&self) -> DedupResult {
        let mut total = DedupResult::default();
        for pair in &self.pairs {
            total.merge(pair.result.clone());
        }
        total.cancelled |= self.cancelled;
        total
    }
}

/// Main dedup engine
///
/// Earlier trees arbitrate later ones: for `i` in `0..n-1` and `j` in
/// `i+1..n`, `trees[j]` is cleaned against `trees[i]` and then pruned. Pairs
/// run strictly one after another because later pairs observe earlier
/// deletions.
pub struct DedupEngine {
    policy: Policy,
    dry_run: bool,
    cancel: CancelToken,
}

impl DedupEngine {
    /// Create a new dedup engine
    ///
    /// # Errors
    ///
    /// Returns an error if the policy is invalid.
    pub fn new(policy: Policy, dry_run: bool) -> Result<Self> {
        ConfigValidator::validate_policy(&policy)?;

        Ok(Self {
            policy,
            dry_run,
            cancel: CancelToken::new(),
        })
    }

    /// Create an engine for a job config
    ///
    /// # Errors
    ///
    /// Returns an error if the job is invalid.
    pub fn for_job(job: &JobConfig) -> Result<Self> {
        ConfigValidator::validate(job)?;
        Self::new(job.policy.clone(), job.dry_run)
    }

    /// Use an externally controlled cancellation token
    #[must_use]
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// The engine's policy
    #[must_use]
    pub const fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Clean `candidate` against `reference`, then prune `candidate`
    ///
    /// Pruning is skipped when the comparison was cancelled.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the pair cannot be compared.
    pub fn run_pair(&self, reference: &Path, candidate: &Path) -> Result<DedupResult> {
        log::info!(
            "Examining {} against {}",
            candidate.display(),
            reference.display()
        );

        let executor = DeletionExecutor::new(self.dry_run);
        let comparator = TreeComparator::new(&self.policy, executor, self.cancel.clone());
        let mut result = comparator.compare(reference, candidate)?;

        if !result.cancelled {
            EmptyDirPruner::new(&self.policy.cache_marker, executor).prune(candidate, &mut result);
        }

        Ok(result)
    }

    /// Run the whole priority chain
    ///
    /// Trees missing on disk when their turn comes are skipped without error.
    /// The chain is validated before the first pair, so a repeated or nested
    /// tree fails the run with nothing deleted.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the chain is invalid or a pair
    /// cannot be compared.
    pub fn run_chain(&self, trees: &[PathBuf]) -> Result<ChainReport> {
        ConfigValidator::validate_trees(trees)?;

        let mut report = ChainReport::default();

        for (i, reference) in trees.iter().enumerate() {
            if i + 1 == trees.len() {
                break;
            }

            if !reference.is_dir() {
                log::info!("Skipping missing reference tree {}", reference.display());
                continue;
            }

            for candidate in &trees[i + 1..] {
                if self.cancel.is_cancelled() {
                    log::warn!("Cancelled, remaining pairs skipped");
                    report.cancelled = true;
                    return Ok(report);
                }

                if !candidate.is_dir() {
                    log::info!("Skipping missing candidate tree {}", candidate.display());
                    continue;
                }

                let result = self.run_pair(reference, candidate)?;
                let cancelled = result.cancelled;

                report.pairs.push(PairReport {
                    reference: reference.clone(),
                    candidate: candidate.clone(),
                    result,
                });

                if cancelled {
                    report.cancelled = true;
                    return Ok(report);
                }
            }
        }

        Ok(report)
    }

    /// Run a job's chain `[mainPath, examinePaths...]`
    ///
    /// # Errors
    ///
    /// See [`Self::run_chain`].
    pub fn run_job(&self, job: &JobConfig) -> Result<ChainReport> {
        self.run_chain(&job.chain())
    }
}
