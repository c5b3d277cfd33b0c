//! A small genetic algorithm engine for single-byte genomes.
//!
//! Sized for microcontrollers: the population lives in a fixed-capacity
//! buffer, fitness comes from a caller-supplied evaluator, and state can be
//! saved to and restored from any byte-addressable store such as an EEPROM.
//!
//! ```
//! use tinyga::config::{EngineConfig, StorageConfig};
//! use tinyga::data::{MemoryStore, PersistenceCodec};
//! use tinyga::engines::evaluation::TargetMatch;
//! use tinyga::engines::generation::EvolutionEngine;
//! use tinyga::utils::RngSource;
//!
//! let mut engine = EvolutionEngine::new(
//!     EngineConfig::default(),
//!     TargetMatch::new(0x5A),
//!     RngSource::seeded(42),
//! )?;
//! let solution = engine.run_generations(200);
//!
//! let codec = PersistenceCodec::new(&StorageConfig::default());
//! let mut store = MemoryStore::zeroed(1024);
//! engine.save(&codec, &mut store)?;
//! # let _ = solution;
//! # Ok::<(), tinyga::error::TinyGaError>(())
//! ```

pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod types;
pub mod utils;

pub use error::{Result, TinyGaError};
pub use types::{EngineSnapshot, Fitness, GenerationStats, Genome, PersistedState, SOLUTION_FITNESS};
