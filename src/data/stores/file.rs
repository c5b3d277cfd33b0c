use super::{out_of_range, ByteStore};
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// EEPROM image kept in a file.
///
/// The whole image is read on open. Writes only touch the in-memory copy
/// until [`FileStore::flush`] is called.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    bytes: Vec<u8>,
    dirty: bool,
}

impl FileStore {
    /// Opens `path` as an image of exactly `size` bytes. A missing file
    /// starts zeroed; a short file is zero-padded and a long one truncated.
    pub fn open<P: AsRef<Path>>(path: P, size: usize) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut bytes = if path.exists() {
            fs::read(&path)?
        } else {
            log::info!("Creating new {} byte store at {}", size, path.display());
            Vec::new()
        };
        let dirty = bytes.len() != size;
        bytes.resize(size, 0);

        Ok(Self { path, bytes, dirty })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Writes the image back to disk if anything changed.
    pub fn flush(&mut self) -> Result<()> {
        if self.dirty {
            fs::write(&self.path, &self.bytes)?;
            self.dirty = false;
            log::debug!("Flushed store to {}", self.path.display());
        }
        Ok(())
    }
}

impl ByteStore for FileStore {
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
        if *cell != value {
            *cell = value;
            self.dirty = true;
        }
        Ok(())
    }
}
