//! Dedup action determination logic

use std::path::PathBuf;

use crate::comparison::{DeleteRule, Verdict};

/// Action to perform on the candidate tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DedupAction {
    /// Delete a candidate file that duplicates its reference counterpart
    Delete {
        /// Reference file, kept
        reference: PathBuf,
        /// Candidate file, deleted
        candidate: PathBuf,
        /// Rule that decided the deletion
        rule: DeleteRule,
    },
    /// Delete a cache-marker file regardless of the reference tree
    RemoveCacheMarker {
        /// Cache-marker path in the candidate tree
        path: PathBuf,
    },
    /// Keep both copies and report them together
    KeepConflict {
        /// Reference file
        reference: PathBuf,
        /// Candidate file
        candidate: PathBuf,
    },
}

/// Resolves oracle verdicts into dedup actions
pub struct DedupActionResolver;

impl DedupActionResolver {
    /// Determine the action for a verdict
    ///
    /// Anything short of a delete verdict keeps both copies.
    #[must_use]
    pub fn resolve(reference: PathBuf, candidate: PathBuf, verdict: Verdict) -> DedupAction {
        match verdict {
            Verdict::Delete(rule) => DedupAction::Delete {
                reference,
                candidate,
                rule,
            },
            Verdict::Keep | Verdict::NeedsContentCheck => {
                DedupAction::KeepConflict { reference, candidate }
            }
        }
    }
}
