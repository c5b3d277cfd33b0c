use serde::{Deserialize, Serialize};
use std::fmt;

/// A single-byte genome. The engine never interprets its bits.
pub type Genome = u8;

/// Fitness score returned by an evaluator.
pub type Fitness = u8;

/// Fitness value reserved for "accept this genome as the solution".
pub const SOLUTION_FITNESS: Fitness = 255;

/// Engine state as it lives in the byte store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    pub pop_size: u8,
    pub generation: u16,
    pub population: Vec<Genome>,
}

/// What one evolve step saw and did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number the step produced.
    pub generation: u16,
    /// Selection threshold after the degeneracy guard.
    pub average: u8,
    pub max: u8,
    /// Size of the breeding pool after the all-survive guard.
    pub survivors: usize,
}

/// Read-only view of the engine used for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub generation: u16,
    pub pop_size: usize,
    pub population: Vec<Genome>,
}

impl fmt::Display for EngineSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generation {}:", self.generation)?;
        writeln!(f, "Population size: {}", self.pop_size)?;
        for genome in &self.population {
            write!(f, "{}, ", genome)?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_report_layout() {
        let snapshot = EngineSnapshot {
            generation: 7,
            pop_size: 3,
            population: vec![1, 22, 255],
        };

        let report = snapshot.to_string();
        assert_eq!(report, "Generation 7:\nPopulation size: 3\n1, 22, 255, \n");
    }

    #[test]
    fn test_snapshot_json() {
        let snapshot = EngineSnapshot {
            generation: 1,
            pop_size: 1,
            population: vec![9],
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"{"generation":1,"pop_size":1,"population":[9]}"#);
    }
}
