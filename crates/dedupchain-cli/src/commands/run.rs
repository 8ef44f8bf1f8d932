use std::path::Path;

use anyhow::Context;
use dedupchain_core::config::ConfigManager;

use super::common::{RunOptions, execute_job, print_report};
use crate::exit::ExitStatus;

pub struct Run;

impl Run {
    pub fn execute(config: &Path, options: &RunOptions) -> anyhow::Result<ExitStatus> {
        log::info!("Processing {}", config.display());

        let mut job = ConfigManager::load(config)
            .with_context(|| format!("Failed to load job {}", config.display()))?;
        options.apply_to(&mut job);

        if job.dry_run {
            log::info!("Dry run: nothing will be deleted");
        }

        let report = execute_job(&job, options)
            .with_context(|| format!("Dedup run failed for {}", config.display()))?;

        Ok(print_report(&report))
    }
}
