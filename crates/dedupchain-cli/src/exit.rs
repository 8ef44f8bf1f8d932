//! Process exit statuses

use dedupchain_core::dedup::DedupResult;
use dedupchain_core::error::is_config_error;

/// Exit status of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Completed without per-entry errors
    Success = 0,
    /// Unexpected failure
    Failure = 1,
    /// Missing or malformed config, equal or missing tree roots
    ConfigError = 2,
    /// Completed, but some entries failed
    PartialSuccess = 3,
    /// Stopped by Ctrl+C
    Interrupted = 130,
}

impl ExitStatus {
    /// Status for a finished run
    pub const fn for_result(result: &DedupResult) -> Self {
        if result.cancelled {
            Self::Interrupted
        } else if result.is_success() {
            Self::Success
        } else {
            Self::PartialSuccess
        }
    }

    /// Status for a failed run
    pub fn for_error(err: &anyhow::Error) -> Self {
        if is_config_error(err) {
            Self::ConfigError
        } else {
            Self::Failure
        }
    }

    /// The more severe of two statuses
    #[must_use]
    pub const fn worst(self, other: Self) -> Self {
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }

    const fn severity(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::PartialSuccess => 1,
            Self::Failure => 2,
            Self::ConfigError => 3,
            Self::Interrupted => 4,
        }
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        Self::from(status as u8)
    }
}
