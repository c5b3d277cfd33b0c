//! Byte layout of a saved engine state.
//!
//! ```text
//! offset+0..3   marker, marker, marker
//! offset+3      pop_size
//! offset+4..6   generation, big-endian
//! offset+6..    population, one byte per genome
//! ```

use crate::config::storage::{StorageConfig, HEADER_LEN};
use crate::data::stores::ByteStore;
use crate::error::{Result, TinyGaError};
use crate::types::PersistedState;

const MARKER_LEN: usize = 3;

/// Written over the first marker byte to retire a saved state.
const INVALIDATED: u8 = 0x00;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistenceCodec {
    marker: u8,
    offset: usize,
}

impl PersistenceCodec {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            marker: config.marker,
            offset: config.offset,
        }
    }

    pub fn marker(&self) -> u8 {
        self.marker
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes a record for `pop_size` genomes occupies.
    pub fn record_len(pop_size: usize) -> usize {
        HEADER_LEN + pop_size
    }

    /// Writes `state` at the configured offset.
    ///
    /// Nothing is written when the record would run past the end of the
    /// store. The marker goes down last, so a write that fails midway
    /// leaves a record that does not load.
    pub fn save<S: ByteStore + ?Sized>(
        &self,
        store: &mut S,
        state: &PersistedState,
    ) -> Result<()> {
        let pop_size = usize::from(state.pop_size);
        if state.population.len() != pop_size {
            return Err(TinyGaError::InvalidPersistedState(format!(
                "pop_size {} but {} genomes",
                pop_size,
                state.population.len()
            )));
        }

        let capacity = store.capacity();
        let required = self.end_of(Self::record_len(pop_size), capacity)?;
        if required > capacity {
            return Err(TinyGaError::StorageCapacity { required, capacity });
        }

        store.write(self.offset, INVALIDATED)?;
        store.write(self.offset + MARKER_LEN, state.pop_size)?;
        for (i, byte) in state.generation.to_be_bytes().into_iter().enumerate() {
            store.write(self.offset + MARKER_LEN + 1 + i, byte)?;
        }
        for (i, &genome) in state.population.iter().enumerate() {
            store.write(self.offset + HEADER_LEN + i, genome)?;
        }
        for i in (0..MARKER_LEN).rev() {
            store.write(self.offset + i, self.marker)?;
        }

        log::info!(
            "Saved generation {} ({} genomes) at offset {}",
            state.generation,
            pop_size,
            self.offset
        );
        Ok(())
    }

    /// True when all three marker bytes are present.
    pub fn has_marker<S: ByteStore + ?Sized>(&self, store: &S) -> Result<bool> {
        match self.offset.checked_add(MARKER_LEN) {
            Some(end) if end <= store.capacity() => {}
            _ => return Ok(false),
        }
        for i in 0..MARKER_LEN {
            if store.read(self.offset + i)? != self.marker {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Reads a saved state. `max_population` bounds the stored pop_size.
    pub fn load<S: ByteStore + ?Sized>(
        &self,
        store: &S,
        max_population: usize,
    ) -> Result<PersistedState> {
        if !self.has_marker(store)? {
            return Err(TinyGaError::InvalidPersistedState(
                "marker not found".to_string(),
            ));
        }
        let capacity = store.capacity();
        if self.end_of(HEADER_LEN, capacity)? > capacity {
            return Err(TinyGaError::InvalidPersistedState(
                "header runs past end of store".to_string(),
            ));
        }

        let pop_size = store.read(self.offset + MARKER_LEN)?;
        if pop_size == 0 || usize::from(pop_size) > max_population {
            return Err(TinyGaError::InvalidPersistedState(format!(
                "stored pop_size {} outside 1..={}",
                pop_size, max_population
            )));
        }
        if self.end_of(Self::record_len(usize::from(pop_size)), capacity)? > capacity {
            return Err(TinyGaError::InvalidPersistedState(format!(
                "{} genomes run past end of store",
                pop_size
            )));
        }

        let generation = u16::from_be_bytes([
            store.read(self.offset + MARKER_LEN + 1)?,
            store.read(self.offset + MARKER_LEN + 2)?,
        ]);
        let population = (0..usize::from(pop_size))
            .map(|i| store.read(self.offset + HEADER_LEN + i))
            .collect::<Result<Vec<_>>>()?;

        Ok(PersistedState {
            pop_size,
            generation,
            population,
        })
    }

    /// First address past a `len`-byte span at the configured offset.
    fn end_of(&self, len: usize, capacity: usize) -> Result<usize> {
        self.offset
            .checked_add(len)
            .ok_or(TinyGaError::StorageCapacity {
                required: usize::MAX,
                capacity,
            })
    }

    /// Retires a saved state so it no longer loads. Returns whether there
    /// was one to retire; a store without a marker is left untouched.
    pub fn invalidate<S: ByteStore + ?Sized>(&self, store: &mut S) -> Result<bool> {
        if !self.has_marker(store)? {
            return Ok(false);
        }
        store.write(self.offset, INVALIDATED)?;
        log::info!("Invalidated saved state at offset {}", self.offset);
        Ok(true)
    }
}
