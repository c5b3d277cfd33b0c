use crate::types::{Fitness, Genome, SOLUTION_FITNESS};

/// Scores a genome. [`SOLUTION_FITNESS`] marks an accepted solution.
///
/// Called up to `pop_size` times per generation, so it must return
/// promptly and must not depend on engine state.
pub trait FitnessEvaluator {
    fn evaluate(&self, genome: Genome) -> Fitness;
}

impl<F> FitnessEvaluator for F
where
    F: Fn(Genome) -> Fitness,
{
    fn evaluate(&self, genome: Genome) -> Fitness {
        self(genome)
    }
}

/// Rewards genomes by how many bits they share with `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetMatch {
    pub target: Genome,
}

impl TargetMatch {
    /// Score per matching bit for anything short of an exact match.
    const BIT_SCORE: u8 = 28;

    pub fn new(target: Genome) -> Self {
        Self { target }
    }
}

impl FitnessEvaluator for TargetMatch {
    fn evaluate(&self, genome: Genome) -> Fitness {
        if genome == self.target {
            return SOLUTION_FITNESS;
        }
        // At most 7 bits match here, so the product stays below 255.
        let matching = (!(genome ^ self.target)).count_ones() as u8;
        matching * Self::BIT_SCORE
    }
}

/// Accepts any genome at or above `floor`; below it the value is the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threshold {
    pub floor: Genome,
}

impl FitnessEvaluator for Threshold {
    fn evaluate(&self, genome: Genome) -> Fitness {
        if genome >= self.floor {
            SOLUTION_FITNESS
        } else {
            genome
        }
    }
}
