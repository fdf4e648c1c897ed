//! Wall-clock timing of single oracle invocations.
//!
//! All timing uses `std::time::Instant`, which is monotonic on every
//! supported platform. Durations are reported as `f64` seconds.

use std::hint::black_box as std_black_box;
use std::time::{Duration, Instant};

use crate::comparator::Oracle;
use crate::config::DelayMode;

/// Wrapper around `std::hint::black_box` for preventing compiler optimizations.
///
/// Use this to wrap calls being measured so the compiler cannot drop the
/// computation or move it across the clock reads.
#[inline]
pub fn black_box<T>(x: T) -> T {
    std_black_box(x)
}

/// Block the calling thread for `duration`.
///
/// `Sleep` parks the thread; `Spin` busy-waits on the monotonic clock.
/// Neither returns early.
#[inline]
pub fn block_for(duration: Duration, mode: DelayMode) {
    if duration.is_zero() {
        return;
    }
    match mode {
        DelayMode::Sleep => std::thread::sleep(duration),
        DelayMode::Spin => {
            let start = Instant::now();
            while start.elapsed() < duration {
                std::hint::spin_loop();
            }
        }
    }
}

/// Times one oracle invocation.
///
/// This is the seam between the attack engine and the clock. [`Timer`] is the
/// real implementation; tests substitute stopwatches that compute durations
/// from the probe.
pub trait Stopwatch {
    /// Invoke `oracle` exactly once with `probe` and return the elapsed
    /// time in seconds. The oracle's answer is discarded.
    fn time(&mut self, oracle: &mut dyn Oracle, probe: &[u8]) -> f64;
}

/// Monotonic wall-clock stopwatch.
#[derive(Debug, Clone)]
pub struct Timer {
    /// Estimated clock resolution in seconds.
    resolution_secs: f64,
}

impl Timer {
    /// Create a new timer and estimate the clock resolution.
    pub fn new() -> Self {
        Self {
            resolution_secs: measure_resolution_secs(),
        }
    }

    /// Create a timer with a known resolution, skipping estimation.
    pub fn with_resolution(resolution_secs: f64) -> Self {
        Self { resolution_secs }
    }

    /// Estimated clock resolution in seconds.
    pub fn resolution_secs(&self) -> f64 {
        self.resolution_secs
    }

    /// Measure the execution time of a closure in seconds.
    #[inline]
    pub fn measure_secs<F, T>(&self, f: F) -> f64
    where
        F: FnOnce() -> T,
    {
        let start = Instant::now();
        black_box(f());
        start.elapsed().as_secs_f64()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch for Timer {
    #[inline]
    fn time(&mut self, oracle: &mut dyn Oracle, probe: &[u8]) -> f64 {
        self.measure_secs(|| oracle.query(black_box(probe)))
    }
}

/// Empirically measure clock resolution as the minimum non-zero difference
/// between consecutive reads.
fn measure_resolution_secs() -> f64 {
    let mut min_diff = Duration::MAX;

    for _ in 0..1000 {
        let t1 = Instant::now();
        let mut t2 = Instant::now();
        // Spin until the clock ticks so a zero delta is never recorded.
        while t2 == t1 {
            t2 = Instant::now();
        }
        let diff = t2 - t1;
        if diff < min_diff {
            min_diff = diff;
        }
    }

    if min_diff == Duration::MAX {
        1e-9
    } else {
        min_diff.as_secs_f64()
    }
}
