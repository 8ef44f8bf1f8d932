//! Duplicate decision for a path-identical file pair

use std::path::Path;

use super::hash::ContentHasher;
use super::stamp::FileStamp;
use super::{DeleteRule, Verdict};
use crate::config::Policy;
use crate::error::Result;

/// Decides whether a candidate file duplicates its reference counterpart
///
/// Rules are applied in a fixed order and the first match wins:
/// 1. `force_delete_by_name`
/// 2. extension listed in `force_delete_extensions` (or a leading `"*"` sentinel)
/// 3. identical SHA-256 digest
/// 4. digests differ and `delete_if_smaller_and_older` is off: keep
/// 5. candidate strictly older and strictly smaller: delete, otherwise keep
///
/// Forced rules never touch file content.
#[derive(Debug, Clone, Copy)]
pub struct EqualityOracle<'a> {
    policy: &'a Policy,
    hasher: ContentHasher,
}

impl<'a> EqualityOracle<'a> {
    /// Create an oracle for a policy
    #[must_use]
    pub const fn new(policy: &'a Policy) -> Self {
        Self {
            policy,
            hasher: ContentHasher::new(policy.block_size),
        }
    }

    /// Apply the forced rules only
    ///
    /// Returns [`Verdict::NeedsContentCheck`] when neither forced rule applies.
    #[must_use]
    pub fn precheck(&self, candidate: &Path) -> Verdict {
        if self.policy.force_delete_by_name {
            Verdict::Delete(DeleteRule::ByName)
        } else if self.policy.force_deletes_extension(candidate) {
            Verdict::Delete(DeleteRule::ByExtension)
        } else {
            Verdict::NeedsContentCheck
        }
    }

    /// Apply the content rules (hash, then size and age)
    ///
    /// Only reads the files; never returns [`Verdict::NeedsContentCheck`].
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be hashed or stat'ed.
    pub fn check_content(&self, reference: &Path, candidate: &Path) -> Result<Verdict> {
        let reference_hash = self.hasher.hash(reference)?;
        let candidate_hash = self.hasher.hash(candidate)?;

        if reference_hash == candidate_hash {
            return Ok(Verdict::Delete(DeleteRule::ByHash));
        }

        if !self.policy.delete_if_smaller_and_older {
            return Ok(Verdict::Keep);
        }

        let reference_stamp = FileStamp::read(reference)?;
        let candidate_stamp = FileStamp::read(candidate)?;

        if candidate_stamp.is_older_and_smaller_than(&reference_stamp) {
            Ok(Verdict::Delete(DeleteRule::BySizeAndAge))
        } else {
            Ok(Verdict::Keep)
        }
    }

    /// Full decision: forced rules first, content rules otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if a content check is needed and fails.
    pub fn decide(&self, reference: &Path, candidate: &Path) -> Result<Verdict> {
        match self.precheck(candidate) {
            Verdict::NeedsContentCheck => self.check_content(reference, candidate),
            forced => Ok(forced),
        }
    }
}
