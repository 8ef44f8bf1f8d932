//! Job configuration
//!
//! This module handles:
//! - The [`Policy`] and [`JobConfig`] records
//! - JSON / TOML parsing with serde
//! - Validation into typed [`ConfigError`](crate::error::ConfigError)s
//! - Batch list files naming several jobs
//! - The default template written by `init`

mod batch;
mod loader;
mod template;
mod types;
mod validation;


pub use batch::JobList;
pub use loader::{ConfigFormat, ConfigLoader};
pub use template::ConfigTemplate;
pub use types::{
    ALL_EXTENSIONS, DEFAULT_BLOCK_SIZE, DEFAULT_CACHE_MARKER, JobConfig, Policy,
};
pub use validation::ConfigValidator;

use std::path::Path;

use crate::error::Result;

/// Configuration manager that coordinates parsing and validation
pub struct ConfigManager;

impl ConfigManager {
    /// Load and validate a job config
    ///
    /// # Errors
    ///
    /// Returns an error if the config is missing, malformed or invalid.
    pub fn load(path: &Path) -> Result<JobConfig> {
        let config = ConfigLoader::load(path)?;
        ConfigValidator::validate(&config)?;
        log::debug!("Loaded job {}: {:?}", path.display(), config.policy);
        Ok(config)
    }
}
