//! Demonstration constants.

use std::time::Duration;

/// Number of candidate values per byte position.
pub const CANDIDATE_COUNT: usize = 256;

/// Default secret length in bytes.
pub const DEFAULT_SECRET_LEN: usize = 6;

/// Default delay after each matching byte in the variable-time comparator.
pub const DEFAULT_PER_BYTE_DELAY: Duration = Duration::from_millis(1);

/// Default number of timing samples per candidate byte.
pub const DEFAULT_TRIALS_PER_CANDIDATE: usize = 8;
