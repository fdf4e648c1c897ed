//! Sample collection for one probe.
//!
//! Trials run back to back on the calling thread. Nothing runs concurrently
//! with a timed call, since CPU contention would corrupt the measurement
//! itself.

use crate::comparator::Oracle;

use super::timer::Stopwatch;

/// Collector for the repeated timing trials of a single probe.
#[derive(Debug, Clone, Copy)]
pub struct Collector {
    /// Number of timed trials per probe.
    trials: usize,
}

impl Collector {
    /// Create a collector that takes `trials` samples per probe.
    ///
    /// # Panics
    ///
    /// Panics if `trials` is zero.
    pub fn new(trials: usize) -> Self {
        assert!(trials > 0, "at least one trial per probe is required");
        Self { trials }
    }

    /// Number of samples taken per probe.
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Time `trials` invocations of `oracle` with `probe`.
    ///
    /// Every sample is kept; no outlier filtering is applied.
    pub fn collect<S>(&self, stopwatch: &mut S, oracle: &mut dyn Oracle, probe: &[u8]) -> Vec<f64>
    where
        S: Stopwatch + ?Sized,
    {
        let mut samples = Vec::with_capacity(self.trials);
        for _ in 0..self.trials {
            samples.push(stopwatch.time(oracle, probe));
        }
        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns 1.0, 2.0, 3.0, ... and records each probe it sees.
    struct Counting {
        next: f64,
        seen: Vec<Vec<u8>>,
    }

    impl Stopwatch for Counting {
        fn time(&mut self, oracle: &mut dyn Oracle, probe: &[u8]) -> f64 {
            oracle.query(probe);
            self.seen.push(probe.to_vec());
            self.next += 1.0;
            self.next
        }
    }

    #[test]
    fn test_collects_exactly_trials_samples() {
        let collector = Collector::new(5);
        let mut stopwatch = Counting {
            next: 0.0,
            seen: Vec::new(),
        };
        let mut calls = 0usize;
        let mut oracle = |_: &[u8]| {
            calls += 1;
            false
        };

        let samples = collector.collect(&mut stopwatch, &mut oracle, &[7, 0]);

        assert_eq!(samples, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(calls, 5);
        assert!(stopwatch.seen.iter().all(|p| p == &[7, 0]));
    }

    #[test]
    #[should_panic(expected = "at least one trial")]
    fn test_zero_trials_panics() {
        Collector::new(0);
    }
}
