use crate::core::RandomSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fresh OS-seeded generator on every pick, so selections never repeat
/// across restarts.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&mut self, len: usize) -> usize {
        StdRng::from_entropy().gen_range(0..len)
    }
}

/// Reproducible selections from a fixed seed.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Replays a script of indices, wrapping each one modulo the cargo length.
/// An empty script always picks the first item.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    script: Vec<usize>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(script: Vec<usize>) -> Self {
        Self { script, cursor: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    fn pick(&mut self, len: usize) -> usize {
        if self.script.is_empty() {
            return 0;
        }
        let index = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        index % len
    }
}

/// Source chosen at startup from configuration.
pub enum ConfiguredRandom {
    Thread(ThreadRandom),
    Seeded(SeededRandom),
}

impl ConfiguredRandom {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => ConfiguredRandom::Seeded(SeededRandom::new(seed)),
            None => ConfiguredRandom::Thread(ThreadRandom),
        }
    }
}

impl RandomSource for ConfiguredRandom {
    fn pick(&mut self, len: usize) -> usize {
        match self {
            ConfiguredRandom::Thread(r) => r.pick(len),
            ConfiguredRandom::Seeded(r) => r.pick(len),
        }
    }
}
