//! Job configuration parsing (JSON or TOML)

use std::fs;
use std::path::{Path, PathBuf};

use super::types::JobConfig;
use crate::error::{ConfigError, Result};

/// Config file format, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.json` and anything unrecognised
    Json,
    /// `.toml`
    Toml,
}

impl ConfigFormat {
    /// Pick the format for a config path
    #[must_use]
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// Reads and parses job configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Read and parse a job config
    ///
    /// Relative tree paths are resolved against the config file's directory.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file is missing, unreadable or malformed.
    pub fn load(path: &Path) -> Result<JobConfig> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::parse(&content, ConfigFormat::for_path(path)).map_err(|message| {
            ConfigError::Parse {
                path: path.to_path_buf(),
                message,
            }
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.main_path = resolve(base, &config.main_path);
        for examine in &mut config.examine_paths {
            *examine = resolve(base, examine);
        }

        Ok(config)
    }

    /// Parse config text in the given format
    ///
    /// # Errors
    ///
    /// Returns the parser's message on malformed input.
    pub fn parse(content: &str, format: ConfigFormat) -> std::result::Result<JobConfig, String> {
        match format {
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() || path.as_os_str().is_empty() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
