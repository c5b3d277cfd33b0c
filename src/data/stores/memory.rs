use super::{out_of_range, ByteStore};
use crate::error::Result;

/// Value of a freshly erased EEPROM cell.
pub const ERASED_BYTE: u8 = 0xFF;

/// Store held entirely in RAM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryStore {
    bytes: Vec<u8>,
}

impl MemoryStore {
    pub fn zeroed(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    pub fn erased(size: usize) -> Self {
        Self {
            bytes: vec![ERASED_BYTE; size],
        }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl ByteStore for MemoryStore {
    fn capacity(&self) -> usize {
        self.bytes.len()
    }

    fn read(&self, address: usize) -> Result<u8> {
        self.bytes
            .get(address)
            .copied()
            .ok_or_else(|| out_of_range(address, self.bytes.len()))
    }

    fn write(&mut self, address: usize, value: u8) -> Result<()> {
        let capacity = self.bytes.len();
        let cell = self
            .bytes
            .get_mut(address)
            .ok_or_else(|| out_of_range(address, capacity))?;
        *cell = value;
        Ok(())
    }
}
