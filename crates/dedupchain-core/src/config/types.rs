//! Configuration types and structures

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Extension entry meaning "every extension"
pub const ALL_EXTENSIONS: &str = "*";

/// Default reserved cache-marker filename (macOS directory metadata)
pub const DEFAULT_CACHE_MARKER: &str = ".DS_Store";

/// Default hashing block size in bytes
pub const DEFAULT_BLOCK_SIZE: usize = 64 * 1024;

/// Equality and deletion policy for one comparator run
///
/// `include_hidden` governs whether entries starting with `.` are visited
/// at all. When false, hidden directories are excluded from traversal on
/// both sides, not merely skipped as files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Policy {
    /// Visit entries whose name starts with `.`
    pub include_hidden: bool,

    /// Delete the cache marker from candidate directories unconditionally
    pub remove_cache_files: bool,

    /// Delete any path-identical candidate file without reading content
    pub force_delete_by_name: bool,

    /// Extensions that trigger deletion on path match; a leading `"*"` matches all
    pub force_delete_extensions: Vec<String>,

    /// Delete a differing candidate that is both strictly older and strictly smaller
    pub delete_if_smaller_and_older: bool,

    /// Also compare files lying directly in the two tree roots
    pub compare_root_files: bool,

    /// Reserved cache-marker filename
    pub cache_marker: String,

    /// Hashing block size in bytes
    pub block_size: usize,

    /// Hash the pairs of one directory on the rayon pool
    pub parallel_hashing: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            include_hidden: true,
            remove_cache_files: true,
            force_delete_by_name: false,
            force_delete_extensions: Vec::new(),
            delete_if_smaller_and_older: false,
            compare_root_files: false,
            cache_marker: DEFAULT_CACHE_MARKER.to_string(),
            block_size: DEFAULT_BLOCK_SIZE,
            parallel_hashing: true,
        }
    }
}

impl Policy {
    /// Whether the extension list is the "all extensions" sentinel
    ///
    /// Only a `"*"` in first position counts; elsewhere it matches nothing.
    #[must_use]
    pub fn deletes_all_extensions(&self) -> bool {
        self.force_delete_extensions
            .first()
            .is_some_and(|ext| ext == ALL_EXTENSIONS)
    }

    /// Whether `path` is force-deleted by its extension
    ///
    /// Entries match with or without a leading dot; comparison is case-sensitive.
    #[must_use]
    pub fn force_deletes_extension(&self, path: &Path) -> bool {
        if self.deletes_all_extensions() {
            return true;
        }

        let Some(ext) = path.extension().and_then(OsStr::to_str) else {
            return false;
        };

        self.force_delete_extensions
            .iter()
            .any(|listed| listed.trim_start_matches('.') == ext)
    }

    /// Whether `name` is the reserved cache marker
    #[must_use]
    pub fn is_cache_marker(&self, name: &OsStr) -> bool {
        name == self.cache_marker.as_str()
    }
}

/// One deduplication job: an authoritative tree followed by trees to clean
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobConfig {
    /// The most authoritative tree (T0)
    pub main_path: PathBuf,

    /// Trees to examine, in priority order (T1..Tn)
    pub examine_paths: Vec<PathBuf>,

    /// Log decisions without deleting anything
    #[serde(default)]
    pub dry_run: bool,

    /// Equality and deletion policy
    #[serde(default)]
    pub policy: Policy,
}

impl JobConfig {
    /// The full priority chain `[main, examine...]`
    #[must_use]
    pub fn chain(&self) -> Vec<PathBuf> {
        std::iter::once(self.main_path.clone())
            .chain(self.examine_paths.iter().cloned())
            .collect()
    }

    /// Placeholder job written by `init`
    #[must_use]
    pub fn template() -> Self {
        Self {
            main_path: PathBuf::from("/path/to/main/folder/to/keep"),
            examine_paths: vec![
                PathBuf::from("/path/to/first/folder/to/examine"),
                PathBuf::from("/path/to/second/folder/to/examine"),
            ],
            dry_run: false,
            policy: Policy::default(),
        }
    }
}
