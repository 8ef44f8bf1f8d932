//! Dedup run reporting and statistics

use std::fmt::Write;

use super::orchestrator::ChainReport;
use super::DedupResult;

/// Dedup run reporter
pub struct DedupReporter;

impl DedupReporter {
    /// Generate a summary report for one result
    #[must_use]
    pub fn generate_summary(result: &DedupResult) -> String {
        let mut output = String::new();

        output.push_str("\n=== Dedup Summary ===\n");

        // Show deleted count with rule breakdown
        let _ = write!(output, "Deleted:   {}", result.deleted);
        for (rule, count) in &result.delete_reasons {
            let _ = write!(output, " ({rule}: {count})");
        }
        let _ = writeln!(output);

        let _ = writeln!(output, "Conflicts: {}", result.conflicts.len());
        let _ = writeln!(output, "Pruned:    {}", result.pruned.len());

        if !result.errors.is_empty() {
            let _ = writeln!(output, "\nErrors ({}):", result.errors.len());
            for error in &result.errors {
                let _ = writeln!(output, "  - {error}");
            }
        }

        if result.cancelled {
            output.push_str("\nStatus: ⚠ Cancelled\n");
        } else if result.is_success() {
            output.push_str("\nStatus: ✓ Success\n");
        } else {
            output.push_str("\nStatus: ✗ Completed with errors\n");
        }

        output
    }

    /// Generate a per-pair breakdown followed by the aggregate summary
    #[must_use]
    pub fn generate_chain_summary(report: &ChainReport) -> String {
        let mut output = String::new();

        if !report.pairs.is_empty() {
            output.push_str("\n=== Pairs ===\n");
        }
        for pair in &report.pairs {
            let _ = writeln!(
                output,
                "{} -> {}: deleted {}, conflicts {}, pruned {}, errors {}",
                pair.reference.display(),
                pair.candidate.display(),
                pair.result.deleted,
                pair.result.conflicts.len(),
                pair.result.pruned.len(),
                pair.result.errors.len()
            );
        }

        output.push_str(&Self::generate_summary(&report.total()));
        output
    }
}
