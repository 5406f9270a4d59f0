//! Random source for the coin game
//!
//! Production code draws from the thread-local RNG; tests plug in
//! [`FixedDraws`] to get deterministic outcomes.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;

/// Uniform integer source.
pub trait RandomSource: Send + Sync {
    /// Returns a value in `low..=high`.
    fn draw(&self, low: u32, high: u32) -> u32;
}

/// Draws from `rand::thread_rng`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn draw(&self, low: u32, high: u32) -> u32 {
        rand::thread_rng().gen_range(low..=high)
    }
}

/// Replays a fixed sequence of values, cycling when it runs out.
///
/// Values outside the requested range are clamped into it.
#[derive(Debug)]
pub struct FixedDraws {
    values: Vec<u32>,
    next: AtomicUsize,
}

impl FixedDraws {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            next: AtomicUsize::new(0),
        }
    }
}

impl RandomSource for FixedDraws {
    fn draw(&self, low: u32, high: u32) -> u32 {
        if self.values.is_empty() {
            return low;
        }
        let index = self.next.fetch_add(1, Ordering::Relaxed) % self.values.len();
        self.values[index].clamp(low, high)
    }
}
