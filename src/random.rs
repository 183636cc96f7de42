use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of randomness for move selection.
///
/// Implementors only need to pick an index; [`RandomGenerator::choose`] is built on top.
pub trait RandomGenerator {
    /// Returns an index uniformly distributed in `0..len`. `len` is never zero.
    fn next_index(&mut self, len: usize) -> usize;

    /// Picks one element uniformly, or `None` from an empty slice.
    fn choose<'a, K>(&mut self, items: &'a [K]) -> Option<&'a K> {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_index(items.len()))
    }
}

/// Draws from the thread-local generator; every game differs.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardRandomGenerator;

impl RandomGenerator for StandardRandomGenerator {
    fn next_index(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// A seeded generator, so a game against the random policy can be replayed.
#[derive(Debug, Clone)]
pub struct SeededRandomGenerator {
    rng: StdRng,
    seed: u64,
}

impl SeededRandomGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seeds from entropy and remembers the seed for later replay.
    pub fn from_random() -> Self {
        Self::new(rand::rng().random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomGenerator for SeededRandomGenerator {
    fn next_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

impl<R: RandomGenerator> RandomGenerator for &mut R {
    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }
}
