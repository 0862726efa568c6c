//! Injected source of uniform random indices.
//!
//! Message selection only ever needs "give me an index below `bound`", so that
//! is the whole interface. Production code wraps a `rand` generator; tests
//! script the exact sequence.

use std::collections::VecDeque;

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

pub trait IndexSource {
    /// An index in `0..bound`. `bound` is never zero.
    fn next(&mut self, bound: usize) -> usize;
}

/// Uniform draws from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngIndexSource<R> {
    rng: R,
}

impl<R: Rng> RngIndexSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngIndexSource<ThreadRng> {
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl RngIndexSource<StdRng> {
    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> IndexSource for RngIndexSource<R> {
    fn next(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }
}

/// Replays a fixed list of indices, each reduced modulo the requested bound.
/// Yields 0 once the script runs out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedIndices {
    script: VecDeque<usize>,
    drawn: usize,
}

impl ScriptedIndices {
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: script.into_iter().collect(),
            drawn: 0,
        }
    }

    /// How many indices have been handed out so far.
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl IndexSource for ScriptedIndices {
    fn next(&mut self, bound: usize) -> usize {
        self.drawn += 1;
        self.script.pop_front().unwrap_or(0) % bound
    }
}
