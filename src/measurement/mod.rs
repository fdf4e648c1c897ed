//! Measurement infrastructure for timing attacks.
//!
//! This module provides:
//! - A monotonic wall-clock [`Timer`] behind the [`Stopwatch`] trait
//! - Blocking delays used by the variable-time comparator
//! - Sample collection for the repeated trials of one probe
//!
//! # Timer
//!
//! Timing uses `std::time::Instant`. The per-byte delay the attack looks
//! for is on the order of a millisecond, far above the resolution of any
//! platform clock, so cycle counters are not needed here. The preflight
//! resolution check warns if the configured delay gets too close to the
//! clock's resolution.

mod collector;
mod timer;

pub use collector::Collector;
pub use timer::{black_box, block_for, Stopwatch, Timer};
