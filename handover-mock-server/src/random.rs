//! Random draws behind a trait so handler branching can be scripted in tests.

use rand::Rng;

/// Source of the random numbers a reply needs.
///
/// Implementations are shared across concurrent requests, hence `Send + Sync`.
pub trait RandomSource: Send + Sync {
    /// Uniform integer in `low..=high`.
    fn int_inclusive(&self, low: u32, high: u32) -> u32;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&self, len: usize) -> usize;
}

/// Production source backed by the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn int_inclusive(&self, low: u32, high: u32) -> u32 {
        rand::thread_rng().gen_range(low..=high)
    }

    fn index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Replays queued values in order; used by tests to force a branch.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedRandom {
    values: std::sync::Mutex<std::collections::VecDeque<u64>>,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = u64>) -> Self {
        Self {
            values: std::sync::Mutex::new(values.into_iter().collect()),
        }
    }

    fn next(&self) -> u64 {
        self.values
            .lock()
            .expect("scripted random lock")
            .pop_front()
            .expect("scripted random exhausted")
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn int_inclusive(&self, low: u32, high: u32) -> u32 {
        let v = self.next() as u32;
        assert!((low..=high).contains(&v), "scripted {v} outside {low}..={high}");
        v
    }

    fn index(&self, len: usize) -> usize {
        let v = self.next() as usize;
        assert!(v < len, "scripted index {v} outside 0..{len}");
        v
    }
}
