use super::evolution_engine::ProgressCallback;
use crate::types::{Genome, GenerationStats};

/// Reports progress through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgressCallback;

impl ProgressCallback for LogProgressCallback {
    fn on_generation_start(&mut self, generation: u16) {
        log::trace!("Generation {} evaluating", generation);
    }

    fn on_generation_complete(&mut self, stats: &GenerationStats) {
        log::debug!(
            "Generation {} bred: threshold={}, max={}, parents={}",
            stats.generation,
            stats.average,
            stats.max,
            stats.survivors
        );
    }

    fn on_solution_found(&mut self, generation: u16, index: usize, genome: Genome) {
        log::info!(
            "Solution {} found at index {} in generation {}",
            genome,
            index,
            generation
        );
    }
}

/// Prints one line per generation to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, _generation: u16) {}

    fn on_generation_complete(&mut self, stats: &GenerationStats) {
        println!(
            "Generation {} complete. Max fitness: {}, threshold: {}, parents: {}",
            stats.generation, stats.max, stats.average, stats.survivors
        );
    }

    fn on_solution_found(&mut self, generation: u16, index: usize, genome: Genome) {
        println!(
            "Solution {} (index {}) found in generation {}",
            genome, index, generation
        );
    }
}
