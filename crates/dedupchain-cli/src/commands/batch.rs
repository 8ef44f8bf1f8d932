use std::path::Path;

use anyhow::Context;
use dedupchain_core::config::JobList;

use super::common::RunOptions;
use super::run::Run;
use crate::exit::ExitStatus;

pub struct Batch;

impl Batch {
    /// Run every listed job; a failing job does not stop the others
    pub fn execute(list: &Path, options: &RunOptions) -> anyhow::Result<ExitStatus> {
        let jobs = JobList::load(list).context("Failed to load job list")?;

        if jobs.is_empty() {
            log::warn!("No jobs listed in {}", list.display());
        }

        let mut status = ExitStatus::Success;
        for job in &jobs {
            if options.cancel.is_cancelled() {
                log::warn!("Cancelled, remaining jobs skipped");
                status = status.worst(ExitStatus::Interrupted);
                break;
            }

            let outcome = match Run::execute(job, options) {
                Ok(outcome) => outcome,
                Err(e) => {
                    eprintln!("Error: {e:#}");
                    ExitStatus::for_error(&e)
                }
            };
            status = status.worst(outcome);
        }

        Ok(status)
    }
}
