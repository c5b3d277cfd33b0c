use crate::types::{Fitness, Genome};
use crate::utils::random::RandomSource;

/// Smallest and largest crossover shift. Excluding 0 and 7 keeps the mask
/// from being all-ones or all-zeros, so every child mixes both parents.
pub const MIN_SHIFT: u32 = 1;
pub const MAX_SHIFT: u32 = 6;

/// Integer mean and maximum of a generation's fitness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionThreshold {
    /// Survival cut-off, already halved when it equals `max`.
    pub average: u8,
    pub max: u8,
}

/// Computes the survival threshold for `fitnesses`.
///
/// When the mean equals the maximum (all scores tied) it is halved, or the
/// cut-off would admit everyone and selection would stall.
pub fn selection_threshold(fitnesses: &[Fitness]) -> SelectionThreshold {
    if fitnesses.is_empty() {
        return SelectionThreshold { average: 0, max: 0 };
    }

    let sum: u32 = fitnesses.iter().map(|&f| u32::from(f)).sum();
    let max = fitnesses.iter().copied().max().unwrap_or(0);
    // mean of u8 values fits in u8
    let mut average = (sum / fitnesses.len() as u32) as u8;
    if average == max {
        average >>= 1;
    }

    SelectionThreshold { average, max }
}

/// Copies every genome scoring at least `threshold` to the front of `out`,
/// in index order, and returns how many were copied.
pub fn select_survivors(
    population: &[Genome],
    fitnesses: &[Fitness],
    threshold: u8,
    out: &mut [Genome],
) -> usize {
    let mut count = 0;
    for (&genome, &fitness) in population.iter().zip(fitnesses) {
        if fitness >= threshold {
            out[count] = genome;
            count += 1;
        }
    }
    count
}

/// Number of survivors allowed to breed. When everyone survived only the
/// first half breeds.
pub fn breeding_pool(survivors: usize, pop_size: usize) -> usize {
    if survivors == pop_size {
        survivors >> 1
    } else {
        survivors
    }
}

/// Draws two distinct parent indices from `[0, pool)`, re-drawing the
/// second until it differs from the first.
///
/// A pool of one has no distinct pair; the sole parent is paired with
/// itself. `pool` must be at least 1.
pub fn pick_parents<R: RandomSource + ?Sized>(pool: usize, rng: &mut R) -> (usize, usize) {
    debug_assert!(pool >= 1);
    if pool < 2 {
        return (0, 0);
    }
    // pool never exceeds the population capacity of 255
    let bound = pool as u32;
    let first = rng.uniform(bound) as usize;
    let mut second = rng.uniform(bound) as usize;
    while second == first {
        second = rng.uniform(bound) as usize;
    }
    (first, second)
}

/// Mask keeping the top `8 - shift` bits.
pub fn crossover_mask(shift: u32) -> u8 {
    0xFFu8 << shift
}

/// High bits from `parent1`, low `shift` bits from `parent2`.
pub fn combine(parent1: Genome, parent2: Genome, shift: u32) -> Genome {
    let mask = crossover_mask(shift);
    (parent1 & mask) | (parent2 & !mask)
}

/// With probability `1 / period` XORs `child` with a fresh random byte.
/// The XOR can flip anywhere from none to all eight bits.
pub fn mutate<R: RandomSource + ?Sized>(child: Genome, period: u32, rng: &mut R) -> Genome {
    if rng.uniform(period) == 0 {
        child ^ (rng.uniform(256) as Genome)
    } else {
        child
    }
}

/// Single-point bit crossover followed by mutation.
pub fn crossover<R: RandomSource + ?Sized>(
    parent1: Genome,
    parent2: Genome,
    mutation_period: u32,
    rng: &mut R,
) -> Genome {
    let shift = rng.uniform_range(MIN_SHIFT, MAX_SHIFT);
    let child = combine(parent1, parent2, shift);
    mutate(child, mutation_period, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::random::scripted::ScriptedSource;
    use crate::utils::random::RngSource;

    #[test]
    fn test_threshold_mean_and_max() {
        let t = selection_threshold(&[10, 20, 30, 40]);
        assert_eq!(t, SelectionThreshold { average: 25, max: 40 });
    }

    #[test]
    fn test_threshold_truncates() {
        let t = selection_threshold(&[1, 2]);
        assert_eq!(t.average, 1);
    }

    #[test]
    fn test_threshold_halves_when_tied() {
        let t = selection_threshold(&[50, 50, 50]);
        assert_eq!(t, SelectionThreshold { average: 25, max: 50 });

        let t = selection_threshold(&[255, 255]);
        assert_eq!(t.average, 127);
    }

    #[test]
    fn test_threshold_empty() {
        assert_eq!(selection_threshold(&[]).average, 0);
    }

    #[test]
    fn test_survivors_keep_order() {
        let mut out = [0u8; 4];
        let count = select_survivors(&[1, 2, 3, 4], &[30, 10, 40, 25], 25, &mut out);
        assert_eq!(count, 3);
        assert_eq!(&out[..count], &[1, 3, 4]);
    }

    #[test]
    fn test_breeding_pool_halves_when_all_survive() {
        assert_eq!(breeding_pool(4, 4), 2);
        assert_eq!(breeding_pool(5, 5), 2);
        assert_eq!(breeding_pool(1, 1), 0);
        assert_eq!(breeding_pool(3, 4), 3);
    }

    #[test]
    fn test_pick_parents_redraws_duplicates() {
        let mut rng = ScriptedSource::new(&[0, 0, 0, 1]);
        assert_eq!(pick_parents(2, &mut rng), (0, 1));
        assert_eq!(rng.requests, vec![(0, 2); 4]);
    }

    #[test]
    fn test_pick_parents_single_pool() {
        let mut rng = ScriptedSource::new(&[]);
        assert_eq!(pick_parents(1, &mut rng), (0, 0));
        assert!(rng.requests.is_empty());
    }

    #[test]
    fn test_pick_parents_always_distinct() {
        let mut rng = RngSource::seeded(5);
        for pool in 2..20 {
            for _ in 0..100 {
                let (a, b) = pick_parents(pool, &mut rng);
                assert_ne!(a, b);
                assert!(a < pool && b < pool);
            }
        }
    }

    #[test]
    fn test_masks() {
        assert_eq!(crossover_mask(1), 0b1111_1110);
        assert_eq!(crossover_mask(6), 0b1100_0000);
    }

    #[test]
    fn test_combine() {
        assert_eq!(combine(0xFF, 0x00, 3), 0b1111_1000);
        assert_eq!(combine(0x00, 0xFF, 3), 0b0000_0111);
    }

    #[test]
    fn test_crossover_without_mutation() {
        // shift 4, mutation roll 1 (no mutation)
        let mut rng = ScriptedSource::new(&[4, 1]);
        let child = crossover(0xAB, 0xCD, 10, &mut rng);
        assert_eq!(child, 0xAD);
        assert_eq!(rng.requests, vec![(1, 6), (0, 10)]);
    }

    #[test]
    fn test_crossover_with_mutation() {
        // shift 4, mutation roll 0, xor byte 0x0F
        let mut rng = ScriptedSource::new(&[4, 0, 0x0F]);
        let child = crossover(0xAB, 0xCD, 10, &mut rng);
        assert_eq!(child, 0xAD ^ 0x0F);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_mutation_rate_roughly_one_in_period() {
        let mut rng = RngSource::seeded(17);
        let trials = 20_000;
        let changed = (0..trials)
            .filter(|_| mutate(0x55, 10, &mut rng) != 0x55)
            .count();
        assert!((1_500..2_500).contains(&changed));
    }
}
