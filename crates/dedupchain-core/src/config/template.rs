//! Default job config template

use std::fs;
use std::path::Path;

use anyhow::Context;

use super::loader::ConfigFormat;
use super::types::JobConfig;
use crate::error::Result;

/// Writes the default job config
pub struct ConfigTemplate;

impl ConfigTemplate {
    /// Render the template in the given format
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render(format: ConfigFormat) -> Result<String> {
        let template = JobConfig::template();
        let text = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(&template)
                .context("Failed to serialize template as JSON")?,
            ConfigFormat::Toml => {
                toml::to_string_pretty(&template).context("Failed to serialize template as TOML")?
            }
        };
        Ok(text)
    }

    /// Write the template to `path`, never overwriting an existing file
    ///
    /// # Errors
    ///
    /// Returns an error if `path` exists or cannot be written.
    pub fn write(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Refusing to overwrite existing file: {}", path.display());
        }

        let text = Self::render(ConfigFormat::for_path(path))?;
        fs::write(path, text)
            .with_context(|| format!("Failed to write template: {}", path.display()))
    }
}
