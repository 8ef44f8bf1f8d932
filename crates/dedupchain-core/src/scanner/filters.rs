//! Hidden-entry filtering

use std::ffi::OsStr;

/// Whether a file name is hidden (starts with `.`)
#[must_use]
pub fn is_hidden(name: &OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.')
}

/// Decides which directory entries are visited at all
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryFilter {
    include_hidden: bool,
}

impl Default for EntryFilter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl EntryFilter {
    /// Create a filter; hidden entries are dropped unless `include_hidden`
    #[must_use]
    pub const fn new(include_hidden: bool) -> Self {
        Self { include_hidden }
    }

    /// Whether an entry with this name is visited
    #[must_use]
    pub fn allows(&self, name: &OsStr) -> bool {
        self.include_hidden || !is_hidden(name)
    }
}
