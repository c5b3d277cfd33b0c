use super::traits::ConfigSection;
use crate::error::TinyGaError;
use serde::{Deserialize, Serialize};

/// Fingerprint byte written three times ahead of a saved state.
pub const DEFAULT_MARKER: u8 = 0x42;

/// EEPROM size of an ATmega328.
pub const DEFAULT_STORE_SIZE: usize = 1024;

/// Marker bytes plus pop_size plus the 16-bit generation.
pub const HEADER_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub marker: u8,
    /// First address of the saved record.
    pub offset: usize,
    /// Total addressable size of the store.
    pub size: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER,
            offset: 0,
            size: DEFAULT_STORE_SIZE,
        }
    }
}

impl ConfigSection for StorageConfig {
    fn section_name() -> &'static str {
        "storage"
    }

    fn validate(&self) -> Result<(), TinyGaError> {
        // A zeroed or erased store must never read as a valid record.
        if self.marker == 0x00 || self.marker == 0xFF {
            return Err(TinyGaError::Configuration(format!(
                "Marker {:#04x} is indistinguishable from blank storage",
                self.marker
            )));
        }
        if self.offset + HEADER_LEN >= self.size {
            return Err(TinyGaError::Configuration(format!(
                "Offset {} leaves no room for a population in a {} byte store",
                self.offset, self.size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(StorageConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_blank_markers() {
        for marker in [0x00, 0xFF] {
            let config = StorageConfig {
                marker,
                ..StorageConfig::default()
            };
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn test_rejects_offset_without_room() {
        let config = StorageConfig {
            offset: 10,
            size: 16,
            ..StorageConfig::default()
        };
        assert!(config.validate().is_err());

        let config = StorageConfig {
            offset: 9,
            size: 16,
            ..StorageConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
