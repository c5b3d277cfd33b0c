use tinyga::config::{EngineConfig, StorageConfig};
use tinyga::data::{ByteStore, FileStore, MemoryStore, PersistenceCodec};
use tinyga::engines::generation::EvolutionEngine;
use tinyga::types::{Fitness, Genome, PersistedState};
use tinyga::utils::RngSource;
use tinyga::TinyGaError;

fn halved(g: Genome) -> Fitness {
    g / 2
}

fn engine_config(population_size: u8) -> EngineConfig {
    EngineConfig {
        population_size,
        ..EngineConfig::default()
    }
}

#[test]
fn test_roundtrip_through_untouched_store() {
    let codec = PersistenceCodec::new(&StorageConfig::default());
    let mut store = MemoryStore::zeroed(1024);

    let mut engine = EvolutionEngine::new(engine_config(30), halved, RngSource::seeded(1)).unwrap();
    engine.run_generations(12);
    engine.save(&codec, &mut store).unwrap();

    let mut restored =
        EvolutionEngine::new(engine_config(5), halved, RngSource::seeded(2)).unwrap();
    restored.load(&codec, &store).unwrap();

    assert_eq!(restored.pop_size(), 30);
    assert_eq!(restored.generation(), engine.generation());
    assert_eq!(restored.population(), engine.population());
}

#[test]
fn test_roundtrip_at_offset_in_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("eeprom.bin");
    let storage = StorageConfig {
        offset: 200,
        size: 512,
        ..StorageConfig::default()
    };
    let codec = PersistenceCodec::new(&storage);

    let mut engine =
        EvolutionEngine::new(engine_config(100), halved, RngSource::seeded(3)).unwrap();
    engine.run_generations(4);
    {
        let mut store = FileStore::open(&path, storage.size).unwrap();
        engine.save(&codec, &mut store).unwrap();
        store.flush().unwrap();
    }

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[200..204], &[0x42, 0x42, 0x42, 100]);
    assert_eq!(u16::from_be_bytes([bytes[204], bytes[205]]), engine.generation());
    assert_eq!(&bytes[206..306], engine.population());

    let store = FileStore::open(&path, storage.size).unwrap();
    let mut restored =
        EvolutionEngine::new(engine_config(10), halved, RngSource::seeded(4)).unwrap();
    restored.load(&codec, &store).unwrap();
    assert_eq!(restored.snapshot(), engine.snapshot());
}

#[test]
fn test_load_without_marker_leaves_engine() {
    let codec = PersistenceCodec::new(&StorageConfig::default());
    let mut engine = EvolutionEngine::new(engine_config(10), halved, RngSource::seeded(5)).unwrap();
    engine.run_generations(2);
    let before = engine.snapshot();

    for store in [MemoryStore::zeroed(64), MemoryStore::erased(64)] {
        let result = engine.load(&codec, &store);
        assert!(matches!(result, Err(TinyGaError::InvalidPersistedState(_))));
        assert_eq!(engine.snapshot(), before);
    }
}

#[test]
fn test_reset_invalidates_saved_state() {
    let codec = PersistenceCodec::new(&StorageConfig::default());
    let mut store = MemoryStore::zeroed(256);

    let mut engine = EvolutionEngine::new(engine_config(20), halved, RngSource::seeded(6)).unwrap();
    engine.save(&codec, &mut store).unwrap();
    assert!(codec.has_marker(&store).unwrap());

    engine.reset(Some(40), &codec, &mut store).unwrap();
    assert_eq!(engine.pop_size(), 40);
    assert!(!codec.has_marker(&store).unwrap());
    assert_eq!(store.read(0).unwrap(), 0x00);

    let mut other = EvolutionEngine::new(engine_config(20), halved, RngSource::seeded(7)).unwrap();
    assert!(other.load(&codec, &store).is_err());
}

#[test]
fn test_save_too_large_for_store() {
    let storage = StorageConfig {
        offset: 10,
        size: 64,
        ..StorageConfig::default()
    };
    let codec = PersistenceCodec::new(&storage);
    let mut store = MemoryStore::zeroed(64);

    let engine = EvolutionEngine::new(engine_config(49), halved, RngSource::seeded(8)).unwrap();
    let result = engine.save(&codec, &mut store);

    assert!(matches!(
        result,
        Err(TinyGaError::StorageCapacity { required: 65, capacity: 64 })
    ));
    assert_eq!(store, MemoryStore::zeroed(64));

    let engine = EvolutionEngine::new(engine_config(48), halved, RngSource::seeded(8)).unwrap();
    assert!(engine.save(&codec, &mut store).is_ok());
}

#[test]
fn test_reads_record_written_by_hand() {
    // record laid down byte by byte in the documented layout
    let mut bytes = vec![0u8; 32];
    bytes[..9].copy_from_slice(&[0x42, 0x42, 0x42, 3, 0x12, 0x34, 7, 8, 9]);
    let store = MemoryStore::from_bytes(bytes);

    let codec = PersistenceCodec::new(&StorageConfig::default());
    let state = codec.load(&store, 100).unwrap();

    assert_eq!(
        state,
        PersistedState {
            pop_size: 3,
            generation: 0x1234,
            population: vec![7, 8, 9],
        }
    );
}

#[test]
fn test_stored_population_above_capacity_is_rejected() {
    let codec = PersistenceCodec::new(&StorageConfig::default());
    let mut store = MemoryStore::zeroed(256);

    let big = EvolutionEngine::new(engine_config(50), halved, RngSource::seeded(9)).unwrap();
    big.save(&codec, &mut store).unwrap();

    let small = EngineConfig {
        max_population: 20,
        population_size: 10,
        ..EngineConfig::default()
    };
    let mut engine = EvolutionEngine::new(small, halved, RngSource::seeded(10)).unwrap();
    assert!(matches!(
        engine.load(&codec, &store),
        Err(TinyGaError::InvalidPersistedState(_))
    ));
    assert_eq!(engine.pop_size(), 10);
}
