//! Configuration validation and error reporting

use std::path::{Component, Path, PathBuf};

use super::types::{JobConfig, Policy};
use crate::error::{ConfigError, Result};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Create a new config validator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validate a job configuration
    ///
    /// Tree existence is not checked here: missing trees are skipped by the
    /// scheduler. See [`Self::validate_trees`] for the chain checks.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is invalid.
    pub fn validate(config: &JobConfig) -> Result<()> {
        if config.main_path.as_os_str().is_empty() {
            return Err(invalid("mainPath cannot be empty"));
        }

        if config.examine_paths.is_empty() {
            return Err(invalid("examinePaths must list at least one directory"));
        }

        Self::validate_trees(&config.chain())?;
        Self::validate_policy(&config.policy)
    }

    /// Validate a priority chain before anything is compared
    ///
    /// Rejects a tree listed twice, and two existing trees where one
    /// contains the other.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] on an empty, repeated or nested tree.
    pub fn validate_trees(trees: &[PathBuf]) -> Result<()> {
        let mut seen: Vec<PathBuf> = Vec::new();
        let mut existing: Vec<(&PathBuf, PathBuf)> = Vec::new();

        for path in trees {
            if path.as_os_str().is_empty() {
                return Err(invalid("examinePaths cannot contain an empty path"));
            }

            let normalized = normalize(path);
            if seen.contains(&normalized) {
                return Err(ConfigError::SamePath(path.clone()).into());
            }
            seen.push(normalized);

            let Ok(real) = dunce::canonicalize(path) else {
                continue;
            };
            if let Some((outer, _)) = existing
                .iter()
                .find(|(_, other)| real.starts_with(other) || other.starts_with(&real))
            {
                return Err(ConfigError::NestedTrees {
                    reference: outer.to_path_buf(),
                    candidate: path.clone(),
                }
                .into());
            }
            existing.push((path, real));
        }

        Ok(())
    }

    /// Validate a policy on its own
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the policy is invalid.
    pub fn validate_policy(policy: &Policy) -> Result<()> {
        if policy.block_size == 0 {
            return Err(invalid("blockSize must be greater than zero"));
        }

        let marker = Path::new(&policy.cache_marker);
        let mut components = marker.components();
        if !matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        ) {
            return Err(invalid(&format!(
                "cacheMarker must be a plain file name, got {:?}",
                policy.cache_marker
            )));
        }

        for ext in &policy.force_delete_extensions {
            if ext.trim().trim_start_matches('.').is_empty() {
                return Err(invalid("forceDeleteExtensions cannot contain an empty entry"));
            }
        }

        Ok(())
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid(message: &str) -> anyhow::Error {
    ConfigError::Invalid(message.to_string()).into()
}

/// Canonical form when the path exists, the path as written otherwise
fn normalize(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.components().collect())
}
