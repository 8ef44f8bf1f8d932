use std::path::Path;

use anyhow::Context;
use dedupchain_core::dedup::{DedupEngine, DedupReporter};

use super::common::RunOptions;
use crate::cli::PolicyArgs;
use crate::exit::ExitStatus;

pub struct Pair;

impl Pair {
    pub fn execute(
        reference: &Path,
        candidate: &Path,
        policy: &PolicyArgs,
        options: &RunOptions,
    ) -> anyhow::Result<ExitStatus> {
        let engine = DedupEngine::new(policy.to_policy(options.sequential), options.dry_run)
            .context("Invalid policy")?
            .with_cancel_token(options.cancel.clone());

        let result = engine
            .run_pair(reference, candidate)
            .context("Dedup run failed")?;

        println!("{}", DedupReporter::generate_summary(&result));
        Ok(ExitStatus::for_result(&result))
    }
}
