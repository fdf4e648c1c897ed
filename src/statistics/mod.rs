//! Aggregation of timing samples into per-candidate decisions.
//!
//! The only statistic used is the arithmetic mean. Candidates are ranked by
//! mean, and the leader is the first candidate to reach the strictly
//! greatest mean.

mod ranking;

pub use ranking::{rank_descending, Leader};

/// Arithmetic mean of `samples`. Returns 0.0 for an empty slice.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}
