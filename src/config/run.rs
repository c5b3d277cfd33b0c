use super::traits::ConfigSection;
use crate::error::TinyGaError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Generation budget for one `run` invocation.
    pub generations: u32,
    pub seed: Option<u64>,
    /// Image file standing in for the EEPROM.
    pub store_path: PathBuf,
    /// Genome the bundled target-matching evaluator accepts.
    pub target: u8,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            generations: 50,
            seed: None,
            store_path: PathBuf::from("tinyga.eeprom"),
            target: 0x5A,
        }
    }
}

impl ConfigSection for RunConfig {
    fn section_name() -> &'static str {
        "run"
    }

    fn validate(&self) -> Result<(), TinyGaError> {
        if self.generations == 0 {
            return Err(TinyGaError::Configuration(
                "Generation budget must be at least 1".to_string()
            ));
        }
        if self.store_path.as_os_str().is_empty() {
            return Err(TinyGaError::Configuration(
                "Store path must not be empty".to_string()
            ));
        }
        Ok(())
    }
}
