use crate::config::{ConfigSection, EngineConfig};
use crate::data::{ByteStore, PersistenceCodec};
use crate::engines::evaluation::FitnessEvaluator;
use crate::engines::generation::{
    operators::{breeding_pool, crossover, pick_parents, select_survivors, selection_threshold},
    population::Population,
    progress::LogProgressCallback,
};
use crate::error::{Result, TinyGaError};
use crate::types::{
    EngineSnapshot, Fitness, GenerationStats, Genome, PersistedState, SOLUTION_FITNESS,
};
use crate::utils::random::RandomSource;

pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: u16);
    fn on_generation_complete(&mut self, stats: &GenerationStats);
    fn on_solution_found(&mut self, generation: u16, index: usize, genome: Genome);
}

/// Genetic algorithm over single-byte genomes.
///
/// Each generation scores every genome, stops if one scores
/// [`SOLUTION_FITNESS`], and otherwise keeps the genomes scoring at least
/// the mean and refills the rest of the population by crossing pairs of
/// them.
pub struct EvolutionEngine<F, R> {
    config: EngineConfig,
    fitness: F,
    rng: R,
    population: Population,
    fitnesses: Box<[Fitness]>,
    // next generation is assembled here, then copied over `population`
    scratch: Box<[Genome]>,
    generation: u16,
}

impl<F: FitnessEvaluator, R: RandomSource> EvolutionEngine<F, R> {
    /// Builds an engine and initializes it with `config.population_size`
    /// random genomes.
    pub fn new(config: EngineConfig, fitness: F, rng: R) -> Result<Self> {
        config.validate()?;

        let capacity = usize::from(config.max_population);
        let mut engine = Self {
            population: Population::with_capacity(capacity),
            fitnesses: vec![0; capacity].into_boxed_slice(),
            scratch: vec![0; capacity].into_boxed_slice(),
            generation: 0,
            config,
            fitness,
            rng,
        };
        engine.initialize(usize::from(engine.config.population_size))?;
        Ok(engine)
    }

    /// Starts over with `size` fresh random genomes at generation 0.
    ///
    /// A size outside `1..=max_population` is rejected with
    /// [`TinyGaError::Configuration`] and the engine is left as it was.
    pub fn initialize(&mut self, size: usize) -> Result<()> {
        self.config.check_population_size(size)?;

        self.population.fill_random(size, &mut self.rng);
        self.fitnesses.fill(0);
        self.generation = 0;

        log::debug!("Initialized {} random genomes", size);
        Ok(())
    }

    /// Runs up to `generations` generations, logging progress.
    ///
    /// Returns the first genome to score [`SOLUTION_FITNESS`]. On `None`
    /// the evolved population is kept, not rolled back.
    pub fn run_generations(&mut self, generations: u32) -> Option<Genome> {
        self.run_generations_with(generations, &mut LogProgressCallback)
    }

    pub fn run_generations_with<C: ProgressCallback + ?Sized>(
        &mut self,
        generations: u32,
        callback: &mut C,
    ) -> Option<Genome> {
        for _ in 0..generations {
            callback.on_generation_start(self.generation);

            if let Some((index, genome)) = self.evaluate() {
                callback.on_solution_found(self.generation, index, genome);
                return Some(genome);
            }

            let stats = self.evolve();
            callback.on_generation_complete(&stats);
        }
        None
    }

    /// Scores genomes in index order, stopping at the first solution.
    fn evaluate(&mut self) -> Option<(usize, Genome)> {
        for (index, &genome) in self.population.as_slice().iter().enumerate() {
            let score = self.fitness.evaluate(genome);
            self.fitnesses[index] = score;
            if score == SOLUTION_FITNESS {
                return Some((index, genome));
            }
        }
        None
    }

    /// Selection and reproduction over the current fitness scores.
    fn evolve(&mut self) -> GenerationStats {
        let size = self.population.len();
        let fitnesses = &self.fitnesses[..size];
        let threshold = selection_threshold(fitnesses);

        let survivors = select_survivors(
            self.population.as_slice(),
            fitnesses,
            threshold.average,
            &mut self.scratch[..size],
        );
        let pool = breeding_pool(survivors, size);

        if pool == 0 {
            // Only reachable with a single genome: all survive, then halve.
            log::warn!(
                "Generation {}: empty breeding pool, population kept",
                self.generation
            );
        } else {
            if pool == 1 && size > 1 {
                log::warn!(
                    "Generation {}: single parent, breeding it with itself",
                    self.generation
                );
            }
            for slot in pool..size {
                let (first, second) = pick_parents(pool, &mut self.rng);
                self.scratch[slot] = crossover(
                    self.scratch[first],
                    self.scratch[second],
                    self.config.mutation_period,
                    &mut self.rng,
                );
            }
            self.population.copy_from(&self.scratch[..size]);
        }

        self.generation = self.generation.wrapping_add(1);

        GenerationStats {
            generation: self.generation,
            average: threshold.average,
            max: threshold.max,
            survivors: pool,
        }
    }

    /// Writes the current state to `store`.
    pub fn save<S: ByteStore + ?Sized>(
        &self,
        codec: &PersistenceCodec,
        store: &mut S,
    ) -> Result<()> {
        codec.save(store, &self.persisted_state())
    }

    /// Replaces the current state with the one saved in `store`.
    ///
    /// Fails with [`TinyGaError::InvalidPersistedState`] when no valid
    /// record is present; the engine is then left untouched.
    pub fn load<S: ByteStore + ?Sized>(
        &mut self,
        codec: &PersistenceCodec,
        store: &S,
    ) -> Result<()> {
        let state = codec.load(store, usize::from(self.config.max_population))?;
        self.restore(&state)?;
        log::info!(
            "Loaded generation {} with {} genomes",
            state.generation,
            state.pop_size
        );
        Ok(())
    }

    /// Loads the saved state if there is one. Returns `false`, keeping the
    /// current state, when the store holds no valid record; store failures
    /// are still errors.
    pub fn resume<S: ByteStore + ?Sized>(
        &mut self,
        codec: &PersistenceCodec,
        store: &S,
    ) -> Result<bool> {
        match self.load(codec, store) {
            Ok(()) => Ok(true),
            Err(TinyGaError::InvalidPersistedState(reason)) => {
                log::info!("No saved state to resume: {}", reason);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Reinitializes, keeping the current size unless `new_size` is given,
    /// then retires any state saved in `store` so it cannot be loaded.
    pub fn reset<S: ByteStore + ?Sized>(
        &mut self,
        new_size: Option<usize>,
        codec: &PersistenceCodec,
        store: &mut S,
    ) -> Result<()> {
        let size = new_size.unwrap_or_else(|| self.population.len());
        self.initialize(size)?;
        codec.invalidate(store)?;
        Ok(())
    }

    pub fn restore(&mut self, state: &PersistedState) -> Result<()> {
        let size = usize::from(state.pop_size);
        self.config.check_population_size(size)?;
        if state.population.len() != size {
            return Err(TinyGaError::InvalidPersistedState(format!(
                "pop_size {} but {} genomes",
                size,
                state.population.len()
            )));
        }

        self.population.copy_from(&state.population);
        self.fitnesses.fill(0);
        self.generation = state.generation;
        Ok(())
    }

    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            // check_population_size keeps len within the u8 max_population
            pop_size: self.population.len() as u8,
            generation: self.generation,
            population: self.population.as_slice().to_vec(),
        }
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            generation: self.generation,
            pop_size: self.population.len(),
            population: self.population.as_slice().to_vec(),
        }
    }

    pub fn pop_size(&self) -> usize {
        self.population.len()
    }

    pub fn generation(&self) -> u16 {
        self.generation
    }

    pub fn population(&self) -> &[Genome] {
        self.population.as_slice()
    }

    /// Scores from the latest evaluation. Stale once a generation has
    /// been bred from them.
    pub fn fitnesses(&self) -> &[Fitness] {
        &self.fitnesses[..self.population.len()]
    }
}
