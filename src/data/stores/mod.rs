mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::{Result, TinyGaError};

/// Byte-addressable non-volatile storage, such as an EEPROM.
///
/// Implementations reject addresses at or beyond `capacity()` with
/// [`TinyGaError::StorageCapacity`].
pub trait ByteStore {
    fn capacity(&self) -> usize;
    fn read(&self, address: usize) -> Result<u8>;
    fn write(&mut self, address: usize, value: u8) -> Result<()>;
}

impl<S: ByteStore + ?Sized> ByteStore for &mut S {
    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn read(&self, address: usize) -> Result<u8> {
        (**self).read(address)
    }

    fn write(&mut self, address: usize, value: u8) -> Result<()> {
        (**self).write(address, value)
    }
}

pub(crate) fn out_of_range(address: usize, capacity: usize) -> TinyGaError {
    TinyGaError::StorageCapacity {
        required: address.saturating_add(1),
        capacity,
    }
}
