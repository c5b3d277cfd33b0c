use crate::types::Genome;
use crate::utils::random::RandomSource;

/// Fixed-capacity genome buffer with a separate active length.
///
/// The buffer is allocated once; changing the active size never
/// reallocates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Population {
    genomes: Box<[Genome]>,
    len: usize,
}

impl Population {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            genomes: vec![0; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.genomes.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The active genomes.
    pub fn as_slice(&self) -> &[Genome] {
        &self.genomes[..self.len]
    }

    /// Sets the active size to `size` and draws every slot uniformly from
    /// `[0, 255]`. `size` must not exceed the capacity.
    pub fn fill_random<R: RandomSource + ?Sized>(&mut self, size: usize, rng: &mut R) {
        debug_assert!(size <= self.capacity());
        self.len = size.min(self.capacity());
        for slot in &mut self.genomes[..self.len] {
            *slot = random_genome(rng);
        }
    }

    /// Replaces the active genomes with `genomes`, truncated to capacity.
    pub fn copy_from(&mut self, genomes: &[Genome]) {
        debug_assert!(genomes.len() <= self.capacity());
        self.len = genomes.len().min(self.capacity());
        self.genomes[..self.len].copy_from_slice(&genomes[..self.len]);
    }
}

pub fn random_genome<R: RandomSource + ?Sized>(rng: &mut R) -> Genome {
    // uniform(256) is always below 256
    rng.uniform(256) as Genome
}
