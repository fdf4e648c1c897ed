//! # compare-oracle
//!
//! Recover a secret through the timing side channel of an early-exit byte
//! comparison, and watch the same attack fail against a constant-time one.
//!
//! The attack engine only sees a black-box oracle that answers "is this
//! probe the secret?". For each byte position it times every candidate
//! value, keeps the candidate with the greatest mean response time, and
//! moves on. Against [`VariableTimeComparator`], which waits after every
//! matching byte, the slowest candidate is the right one. Against
//! [`ConstantTimeComparator`] the means carry no signal and the result is
//! no better than guessing.
//!
//! ## Quick Start
//!
//! ```ignore
//! use compare_oracle::{Config, Experiment, Strategy};
//!
//! let report = Experiment::new(Config::quick())?.run();
//! let leaky = report.run(Strategy::VariableTime).unwrap();
//! println!("recovered {} in {:.2}s", leaky.recovery.to_hex(), leaky.elapsed_secs);
//! ```
//!
//! ## Attacking your own oracle
//!
//! Any `FnMut(&[u8]) -> bool` is an [`Oracle`]:
//!
//! ```ignore
//! use compare_oracle::recover;
//!
//! let recovery = recover(|probe: &[u8]| server.check_token(probe), 16);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod attack;
mod comparator;
mod config;
mod constants;
mod experiment;
mod result;
mod types;

// Functional modules
pub mod measurement;
pub mod output;
pub mod preflight;
pub mod statistics;

// Re-exports for public API
pub use attack::{build_probe, TimingAttack};
pub use comparator::{Comparator, ConstantTimeComparator, Oracle, Target, VariableTimeComparator};
pub use config::{Config, ConfigError, DelayMode};
pub use constants::{
    CANDIDATE_COUNT, DEFAULT_PER_BYTE_DELAY, DEFAULT_SECRET_LEN, DEFAULT_TRIALS_PER_CANDIDATE,
};
pub use experiment::{generate_secret, Experiment, ExperimentReport, Progress, VariantRun};
pub use measurement::{Stopwatch, Timer};
pub use result::{PositionRecord, Recovery, Score, TimingLog};
pub use types::{Candidate, Strategy};

/// Recover a secret of `length` bytes from `oracle` with default settings.
///
/// Uses 8 trials per candidate and the wall-clock timer.
///
/// # Panics
///
/// Panics if `length` is zero.
pub fn recover<O: Oracle>(mut oracle: O, length: usize) -> Recovery {
    TimingAttack::new().recover(&mut oracle, length)
}
