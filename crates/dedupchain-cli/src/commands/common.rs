//! Common types and utilities for command execution

use dedupchain_core::config::JobConfig;
use dedupchain_core::dedup::{CancelToken, ChainReport, DedupEngine, DedupReporter};

use crate::exit::ExitStatus;

/// Execution options shared by all dedup commands
pub struct RunOptions {
    /// Preview deletions without applying them (dry-run)
    pub dry_run: bool,
    /// Hash on the calling thread only
    pub sequential: bool,
    /// Set by the Ctrl+C handler
    pub cancel: CancelToken,
}

impl RunOptions {
    /// Create new run options
    #[must_use]
    pub const fn new(dry_run: bool, sequential: bool, cancel: CancelToken) -> Self {
        Self {
            dry_run,
            sequential,
            cancel,
        }
    }

    /// Apply command-line overrides on top of a loaded job
    pub fn apply_to(&self, job: &mut JobConfig) {
        if self.dry_run {
            job.dry_run = true;
        }
        if self.sequential {
            job.policy.parallel_hashing = false;
        }
    }
}

/// Run a job's whole priority chain
pub fn execute_job(job: &JobConfig, options: &RunOptions) -> anyhow::Result<ChainReport> {
    let engine = DedupEngine::for_job(job)?.with_cancel_token(options.cancel.clone());
    engine.run_job(job)
}

/// Print the chain summary and derive the exit status
pub fn print_report(report: &ChainReport) -> ExitStatus {
    println!("{}", DedupReporter::generate_chain_summary(report));
    ExitStatus::for_result(&report.total())
}
