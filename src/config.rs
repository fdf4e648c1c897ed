//! Configuration for timing attacks and experiments.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_PER_BYTE_DELAY, DEFAULT_SECRET_LEN, DEFAULT_TRIALS_PER_CANDIDATE};

/// Configuration shared by the attack engine and the experiment driver.
///
/// Values are fixed at construction; nothing reads process-wide state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Length of the secret in bytes (default: 6).
    pub secret_len: usize,

    /// Artificial delay after each matching byte in the variable-time
    /// comparator (default: 1 ms).
    pub per_byte_delay: Duration,

    /// Timing samples taken per candidate byte (default: 8).
    pub trials_per_candidate: usize,

    /// How the per-byte delay is realised (default: `Sleep`).
    pub delay_mode: DelayMode,
}

/// How the variable-time comparator waits after a matching byte.
///
/// Both modes block the calling thread; neither yields to a scheduler
/// cooperatively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DelayMode {
    /// `std::thread::sleep`. Cheap on CPU, but the OS may overshoot.
    #[default]
    Sleep,

    /// Busy-wait on the monotonic clock.
    ///
    /// Tighter than `Sleep` for sub-millisecond delays at the cost of a
    /// fully loaded core.
    Spin,
}

/// Errors from validating a [`Config`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The secret must contain at least one byte.
    #[error("secret length must be at least 1 byte")]
    EmptySecret,

    /// At least one trial per candidate is needed to form a mean.
    #[error("trials per candidate must be at least 1")]
    NoTrials,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            secret_len: DEFAULT_SECRET_LEN,
            per_byte_delay: DEFAULT_PER_BYTE_DELAY,
            trials_per_candidate: DEFAULT_TRIALS_PER_CANDIDATE,
            delay_mode: DelayMode::Sleep,
        }
    }
}

impl Config {
    /// Small configuration for tests and quick demonstrations.
    ///
    /// Settings:
    /// - 2-byte secret (vs 6 default)
    /// - 1 ms spin delay (vs 1 ms sleep)
    /// - 8 trials per candidate (same as default)
    pub fn quick() -> Self {
        Self {
            secret_len: 2,
            per_byte_delay: DEFAULT_PER_BYTE_DELAY,
            trials_per_candidate: DEFAULT_TRIALS_PER_CANDIDATE,
            delay_mode: DelayMode::Spin,
        }
    }

    /// Set the secret length.
    pub fn with_secret_len(mut self, secret_len: usize) -> Self {
        self.secret_len = secret_len;
        self
    }

    /// Set the per-byte delay of the variable-time comparator.
    pub fn with_per_byte_delay(mut self, delay: Duration) -> Self {
        self.per_byte_delay = delay;
        self
    }

    /// Set the number of timing samples per candidate.
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials_per_candidate = trials;
        self
    }

    /// Set how the per-byte delay is realised.
    pub fn with_delay_mode(mut self, mode: DelayMode) -> Self {
        self.delay_mode = mode;
        self
    }

    /// Check that the configuration describes a runnable experiment.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret_len == 0 {
            return Err(ConfigError::EmptySecret);
        }
        if self.trials_per_candidate == 0 {
            return Err(ConfigError::NoTrials);
        }
        Ok(())
    }

    /// Oracle invocations needed to attack a secret of `secret_len` bytes.
    pub fn total_invocations(&self) -> usize {
        self.secret_len * crate::constants::CANDIDATE_COUNT * self.trials_per_candidate
    }
}
