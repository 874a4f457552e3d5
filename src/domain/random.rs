//! Pluggable source of the pseudo-random draws used by the credit mock.

use rand::Rng;

pub trait RandomSource: Send + Sync {
    /// Uniform integer in `lo..=hi`.
    fn draw(&self, lo: u32, hi: u32) -> u32;
}

/// Thread-local RNG from the `rand` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn draw(&self, lo: u32, hi: u32) -> u32 {
        rand::rng().random_range(lo..=hi)
    }
}

#[cfg(test)]
pub mod testing {
    use super::RandomSource;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    /// Replays a fixed script of raw values, clamped into the requested range.
    /// Falls back to the lower bound once the script runs out.
    #[derive(Debug, Default)]
    pub struct ScriptedRandom {
        values: Mutex<VecDeque<u32>>,
    }

    impl ScriptedRandom {
        pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
            Self {
                values: Mutex::new(values.into_iter().collect()),
            }
        }
    }

    impl RandomSource for ScriptedRandom {
        fn draw(&self, lo: u32, hi: u32) -> u32 {
            self.values
                .lock()
                .pop_front()
                .map(|v| v.clamp(lo, hi))
                .unwrap_or(lo)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedRandom;
    use super::*;

    #[test]
    fn thread_random_stays_in_range() {
        let rng = ThreadRandom;
        for _ in 0..500 {
            let v = rng.draw(600, 899);
            assert!((600..=899).contains(&v));
        }
    }

    #[test]
    fn scripted_random_replays_then_floors() {
        let rng = ScriptedRandom::new([700, 5]);
        assert_eq!(rng.draw(600, 899), 700);
        assert_eq!(rng.draw(70, 99), 70);
        assert_eq!(rng.draw(75, 104), 75);
    }
}
