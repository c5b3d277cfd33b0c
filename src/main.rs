use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tinyga::config::{AppConfig, ConfigManager};
use tinyga::data::{FileStore, PersistenceCodec};
use tinyga::engines::evaluation::TargetMatch;
use tinyga::engines::generation::{ConsoleProgressCallback, EvolutionEngine, LogProgressCallback};
use tinyga::utils::{RngSource, StdRngSource};
use tinyga::{EngineSnapshot, Genome, TinyGaError};

/// Evolve single-byte genomes against a target, persisting state to an
/// emulated EEPROM image.
#[derive(Parser, Debug)]
#[command(name = "tinyga")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML configuration file; `TINYGA_*` variables override it
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, global = true, default_value = "text")]
    format: Format,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resume (or start) evolution and save the result
    Run {
        /// Generation budget (overrides config)
        #[arg(short, long)]
        generations: Option<u32>,

        /// Genome the evaluator accepts (overrides config)
        #[arg(short, long)]
        target: Option<u8>,

        /// Random seed (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Ignore any saved state
        #[arg(long)]
        fresh: bool,

        /// Print every generation
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the saved state
    Show,

    /// Reinitialize and invalidate the saved state
    Reset {
        /// New population size
        #[arg(short = 'n', long)]
        size: Option<usize>,
    },

    /// Write the default configuration as TOML
    InitConfig {
        #[arg(default_value = "tinyga.toml")]
        path: PathBuf,
    },
}

#[derive(Serialize)]
struct RunReport {
    solution: Option<Genome>,
    state: EngineSnapshot,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    if let Commands::InitConfig { path } = &args.command {
        ConfigManager::new().save_to_file(path)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let manager = ConfigManager::new();
    manager
        .load_layered(args.config.as_deref())
        .context("loading configuration")?;
    let config = manager.get();

    match args.command {
        Commands::Run {
            generations,
            target,
            seed,
            fresh,
            verbose,
        } => run(&config, args.format, generations, target, seed, fresh, verbose),
        Commands::Show => show(&config, args.format),
        Commands::Reset { size } => reset(&config, args.format, size),
        Commands::InitConfig { .. } => Ok(()),
    }
}

fn open_store(config: &AppConfig) -> Result<FileStore> {
    FileStore::open(&config.run.store_path, config.storage.size)
        .with_context(|| format!("opening store {}", config.run.store_path.display()))
}

fn engine(
    config: &AppConfig,
    target: u8,
    seed: Option<u64>,
) -> Result<EvolutionEngine<TargetMatch, StdRngSource>> {
    Ok(EvolutionEngine::new(
        config.engine.clone(),
        TargetMatch::new(target),
        RngSource::from_seed_option(seed),
    )?)
}

#[allow(clippy::too_many_arguments)]
fn run(
    config: &AppConfig,
    format: Format,
    generations: Option<u32>,
    target: Option<u8>,
    seed: Option<u64>,
    fresh: bool,
    verbose: bool,
) -> Result<()> {
    let codec = PersistenceCodec::new(&config.storage);
    let mut store = open_store(config)?;
    let mut engine = engine(config, target.unwrap_or(config.run.target), seed.or(config.run.seed))?;

    if !fresh && !engine.resume(&codec, &store)? {
        log::info!("Starting fresh population");
    }

    let budget = generations.unwrap_or(config.run.generations);
    let solution = if verbose && format == Format::Text {
        engine.run_generations_with(budget, &mut ConsoleProgressCallback)
    } else {
        engine.run_generations_with(budget, &mut LogProgressCallback)
    };

    engine.save(&codec, &mut store)?;
    store.flush()?;

    let report = RunReport {
        solution,
        state: engine.snapshot(),
    };
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Text => {
            match report.solution {
                Some(genome) => println!("Solution found: {}", genome),
                None => println!("No solution within {} generations", budget),
            }
            print!("{}", report.state);
        }
    }
    Ok(())
}

fn show(config: &AppConfig, format: Format) -> Result<()> {
    let codec = PersistenceCodec::new(&config.storage);
    let store = open_store(config)?;
    log::debug!(
        "Reading {} at offset {} (marker {:#04x})",
        store.path().display(),
        codec.offset(),
        codec.marker()
    );

    let state = match codec.load(&store, usize::from(config.engine.max_population)) {
        Ok(state) => state,
        Err(TinyGaError::InvalidPersistedState(reason)) => {
            println!("No saved state found ({})", reason);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let snapshot = EngineSnapshot {
        generation: state.generation,
        pop_size: usize::from(state.pop_size),
        population: state.population,
    };
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
        Format::Text => print!("{}", snapshot),
    }
    Ok(())
}

fn reset(config: &AppConfig, format: Format, size: Option<usize>) -> Result<()> {
    let codec = PersistenceCodec::new(&config.storage);
    let mut store = open_store(config)?;
    let mut engine = engine(config, config.run.target, config.run.seed)?;

    // resize relative to the saved population when there is one
    engine.resume(&codec, &store)?;
    engine.reset(size, &codec, &mut store)?;
    store.flush()?;

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&engine.snapshot())?),
        Format::Text => print!("{}", engine.snapshot()),
    }
    Ok(())
}
