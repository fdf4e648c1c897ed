//! Clock resolution and delay granularity checks.
//!
//! The attack separates candidates by one per-byte delay. If that delay is
//! close to the clock's resolution, or the OS cannot sleep for anything
//! near it, the means stop carrying a usable signal.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::config::DelayMode;
use crate::measurement::block_for;

/// Minimum ratio of per-byte delay to clock resolution.
const MIN_DELAY_TO_RESOLUTION: f64 = 10.0;

/// Sleeps measured by the granularity check.
const GRANULARITY_PROBES: usize = 5;

/// Mean overshoot, as a fraction of the requested delay, that triggers a
/// warning.
const MAX_OVERSHOOT_FRACTION: f64 = 0.5;

/// Warning from the resolution checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResolutionWarning {
    /// The per-byte delay is too close to the clock resolution.
    ///
    /// This is a critical warning - candidate means will be dominated by
    /// quantization.
    InsufficientResolution {
        /// Estimated clock resolution in seconds.
        timer_resolution_secs: f64,
        /// Configured per-byte delay in seconds.
        per_byte_delay_secs: f64,
    },

    /// Sleeping overshoots the requested delay by a wide margin.
    CoarseSleep {
        /// Requested delay in seconds.
        requested_secs: f64,
        /// Mean observed overshoot in seconds.
        mean_overshoot_secs: f64,
    },
}

impl ResolutionWarning {
    /// Check if this warning indicates a critical issue.
    pub fn is_critical(&self) -> bool {
        matches!(self, ResolutionWarning::InsufficientResolution { .. })
    }

    /// Get a human-readable description of the warning.
    pub fn description(&self) -> String {
        match self {
            ResolutionWarning::InsufficientResolution {
                timer_resolution_secs,
                per_byte_delay_secs,
            } => {
                format!(
                    "CRITICAL: Per-byte delay ({:.3e}s) is within {}x of the clock \
                     resolution ({:.3e}s). Increase the delay for a measurable signal.",
                    per_byte_delay_secs, MIN_DELAY_TO_RESOLUTION, timer_resolution_secs
                )
            }
            ResolutionWarning::CoarseSleep {
                requested_secs,
                mean_overshoot_secs,
            } => {
                format!(
                    "Sleeping for {:.6}s overshoots by {:.6}s on average. \
                     Consider DelayMode::Spin for tighter delays.",
                    requested_secs, mean_overshoot_secs
                )
            }
        }
    }
}

/// Check the per-byte delay against the clock resolution.
///
/// Returns a warning if the delay is under ten clock ticks.
pub fn resolution_check(
    timer_resolution_secs: f64,
    per_byte_delay: Duration,
) -> Option<ResolutionWarning> {
    let delay = per_byte_delay.as_secs_f64();
    if delay < timer_resolution_secs * MIN_DELAY_TO_RESOLUTION {
        return Some(ResolutionWarning::InsufficientResolution {
            timer_resolution_secs,
            per_byte_delay_secs: delay,
        });
    }
    None
}

/// Measure how far `DelayMode::Sleep` overshoots `delay`.
///
/// Spin delays and zero delays are not checked.
pub fn sleep_granularity_check(delay: Duration, mode: DelayMode) -> Option<ResolutionWarning> {
    if mode != DelayMode::Sleep || delay.is_zero() {
        return None;
    }

    let mut overshoot = 0.0;
    for _ in 0..GRANULARITY_PROBES {
        let start = Instant::now();
        block_for(delay, mode);
        overshoot += start.elapsed().saturating_sub(delay).as_secs_f64();
    }
    let mean_overshoot_secs = overshoot / GRANULARITY_PROBES as f64;

    overshoot_warning(delay, mean_overshoot_secs)
}

fn overshoot_warning(delay: Duration, mean_overshoot_secs: f64) -> Option<ResolutionWarning> {
    let requested_secs = delay.as_secs_f64();
    if mean_overshoot_secs > requested_secs * MAX_OVERSHOOT_FRACTION {
        Some(ResolutionWarning::CoarseSleep {
            requested_secs,
            mean_overshoot_secs,
        })
    } else {
        None
    }
}
