use std::path::Path;

use dedupchain_core::config::ConfigTemplate;

use crate::exit::ExitStatus;

pub struct Init;

impl Init {
    pub fn execute(path: &Path) -> anyhow::Result<ExitStatus> {
        ConfigTemplate::write(path)?;
        println!("Wrote job template: {}", path.display());
        println!("Edit mainPath and examinePaths before running it.");
        Ok(ExitStatus::Success)
    }
}
