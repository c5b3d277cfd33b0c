use super::traits::ConfigSection;
use crate::error::TinyGaError;
use serde::{Deserialize, Serialize};

/// Population capacity used when nothing else is configured.
pub const DEFAULT_MAX_POPULATION: u8 = 100;

/// Offspring mutate with probability `1 / DEFAULT_MUTATION_PERIOD`.
pub const DEFAULT_MUTATION_PERIOD: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Capacity of the population buffer; bounds every pop_size.
    pub max_population: u8,
    /// Active size used by a fresh initialization.
    pub population_size: u8,
    pub mutation_period: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_population: DEFAULT_MAX_POPULATION,
            population_size: 20,
            mutation_period: DEFAULT_MUTATION_PERIOD,
        }
    }
}

impl EngineConfig {
    /// Checks a population size against this engine's capacity.
    pub fn check_population_size(&self, size: usize) -> Result<(), TinyGaError> {
        if size == 0 || size > usize::from(self.max_population) {
            return Err(TinyGaError::Configuration(format!(
                "Population size {} outside 1..={}",
                size, self.max_population
            )));
        }
        Ok(())
    }
}

impl ConfigSection for EngineConfig {
    fn section_name() -> &'static str {
        "engine"
    }

    fn validate(&self) -> Result<(), TinyGaError> {
        if self.max_population == 0 {
            return Err(TinyGaError::Configuration(
                "Max population must be at least 1".to_string()
            ));
        }
        self.check_population_size(usize::from(self.population_size))?;
        if self.mutation_period == 0 {
            return Err(TinyGaError::Configuration(
                "Mutation period must be at least 1".to_string()
            ));
        }
        Ok(())
    }
}
