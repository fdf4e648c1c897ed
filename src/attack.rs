//! The timing-oracle attack engine.

use tracing::{debug, trace};

use crate::comparator::Oracle;
use crate::config::Config;
use crate::constants::CANDIDATE_COUNT;
use crate::measurement::{Collector, Stopwatch, Timer};
use crate::result::{PositionRecord, Recovery, TimingLog};
use crate::statistics::{mean, Leader};
use crate::types::Candidate;

/// Recovers a secret from an oracle whose response time leaks the length of
/// the matching prefix.
///
/// The search is greedy and one-pass: for each position in turn, every
/// candidate byte is timed `trials_per_candidate` times, the candidate with
/// the greatest mean duration is committed, and the search moves on.
/// Committed bytes are never revisited.
///
/// # Example
///
/// ```ignore
/// use compare_oracle::{Config, Target, TimingAttack, VariableTimeComparator};
///
/// let config = Config::quick();
/// let secret = [0x41, 0x99];
/// let mut target = Target::new(
///     &secret,
///     VariableTimeComparator::new(config.per_byte_delay, config.delay_mode),
/// );
///
/// let recovery = TimingAttack::with_config(config).recover(&mut target, secret.len());
/// assert_eq!(recovery.secret, secret);
/// ```
#[derive(Debug, Clone)]
pub struct TimingAttack<S = Timer> {
    config: Config,
    stopwatch: S,
}

impl Default for TimingAttack {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingAttack {
    /// Create with default configuration and the wall-clock timer.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create with the given configuration and the wall-clock timer.
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            stopwatch: Timer::new(),
        }
    }
}

impl<S: Stopwatch> TimingAttack<S> {
    /// Replace the stopwatch used to time oracle invocations.
    pub fn with_stopwatch<T: Stopwatch>(self, stopwatch: T) -> TimingAttack<T> {
        TimingAttack {
            config: self.config,
            stopwatch,
        }
    }

    /// Set the number of timing samples per candidate.
    pub fn trials(mut self, trials: usize) -> Self {
        self.config.trials_per_candidate = trials;
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the stopwatch.
    pub fn stopwatch(&self) -> &S {
        &self.stopwatch
    }

    /// Recover a secret of `length` bytes from `oracle`.
    ///
    /// # Panics
    ///
    /// Panics if `length` or `trials_per_candidate` is zero.
    pub fn recover<O: Oracle>(&mut self, oracle: &mut O, length: usize) -> Recovery {
        self.recover_with(oracle, length, |_| {})
    }

    /// Recover a secret, calling `on_position` as each byte is committed.
    ///
    /// # Panics
    ///
    /// Panics if `length` or `trials_per_candidate` is zero.
    pub fn recover_with<O, F>(
        &mut self,
        oracle: &mut O,
        length: usize,
        mut on_position: F,
    ) -> Recovery
    where
        O: Oracle,
        F: FnMut(&PositionRecord),
    {
        assert!(length > 0, "secret length must be at least 1");
        let collector = Collector::new(self.config.trials_per_candidate);

        let mut recovered: Vec<u8> = Vec::with_capacity(length);
        let mut log = TimingLog::with_capacity(length);

        for position in 0..length {
            debug_assert_eq!(recovered.len(), position);

            let record = self.attack_position(&collector, oracle, &recovered, length);
            debug!(
                position,
                byte = record.byte,
                mean_secs = record.mean_secs,
                margin_secs = record.margin(),
                "committed byte"
            );

            recovered.push(record.byte);
            on_position(&record);
            log.push(record);
        }

        Recovery {
            secret: recovered,
            log,
        }
    }

    /// Time every candidate at the position after `prefix` and pick the
    /// slowest.
    fn attack_position<O: Oracle>(
        &mut self,
        collector: &Collector,
        oracle: &mut O,
        prefix: &[u8],
        length: usize,
    ) -> PositionRecord {
        let position = prefix.len();
        let mut candidate_means = Vec::with_capacity(CANDIDATE_COUNT);
        let mut leader = Leader::new();

        for candidate in Candidate::MIN..=Candidate::MAX {
            let probe = build_probe(prefix, candidate, length);
            let samples = collector.collect(&mut self.stopwatch, &mut *oracle, &probe);
            let avg = mean(&samples);
            trace!(position, candidate, mean_secs = avg, "timed candidate");

            leader.observe(candidate, avg);
            candidate_means.push(avg);
        }

        // 256 candidates were observed, so a leader always exists.
        let (byte, mean_secs) = leader.best().unwrap_or((0, 0.0));

        PositionRecord {
            position,
            byte,
            mean_secs,
            candidate_means,
        }
    }
}

/// Build the probe `prefix + [candidate] + zero padding`, `length` bytes long.
///
/// # Panics
///
/// Panics if `prefix` already fills `length`.
pub fn build_probe(prefix: &[u8], candidate: Candidate, length: usize) -> Vec<u8> {
    assert!(
        prefix.len() < length,
        "prefix of {} bytes leaves no room in a {}-byte probe",
        prefix.len(),
        length
    );
    let mut probe = Vec::with_capacity(length);
    probe.extend_from_slice(prefix);
    probe.push(candidate);
    probe.resize(length, 0);
    probe
}
