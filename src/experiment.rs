//! Experiment driver: one secret, one attack per comparison strategy.

use std::time::Instant;

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::attack::TimingAttack;
use crate::comparator::Target;
use crate::config::{Config, ConfigError};
use crate::measurement::Timer;
use crate::preflight::{run_all_checks, PreflightResult};
use crate::result::{PositionRecord, Recovery, Score};
use crate::types::Strategy;

/// Generate `len` bytes from the operating system's CSPRNG.
pub fn generate_secret(len: usize) -> Vec<u8> {
    let mut secret = vec![0u8; len];
    OsRng.fill_bytes(&mut secret);
    secret
}

/// Progress reported while an experiment runs.
#[derive(Debug, Clone, Copy)]
pub enum Progress<'a> {
    /// The experiment is about to attack `secret`.
    Started {
        /// The true secret.
        secret: &'a [u8],
    },
    /// An attack against `strategy` is starting.
    RunStarted {
        /// Strategy under attack.
        strategy: Strategy,
    },
    /// A byte position was committed.
    Position {
        /// Strategy under attack.
        strategy: Strategy,
        /// The committed position.
        record: &'a PositionRecord,
    },
    /// An attack finished.
    RunFinished {
        /// The finished run.
        run: &'a VariantRun,
    },
}

/// Result of attacking one comparison strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantRun {
    /// Strategy that was attacked.
    pub strategy: Strategy,
    /// What the engine recovered.
    pub recovery: Recovery,
    /// Recovery scored against the true secret.
    pub score: Score,
    /// Wall-clock duration of the whole attack, in seconds.
    pub elapsed_secs: f64,
}

/// Complete record of an experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    /// Configuration the experiment ran with.
    pub config: Config,
    /// The true secret.
    #[serde(with = "hex::serde")]
    pub secret: Vec<u8>,
    /// Preflight findings.
    pub preflight: PreflightResult,
    /// One run per strategy, in execution order.
    pub runs: Vec<VariantRun>,
}

impl ExperimentReport {
    /// The run for `strategy`, if it was executed.
    pub fn run(&self, strategy: Strategy) -> Option<&VariantRun> {
        self.runs.iter().find(|run| run.strategy == strategy)
    }
}

/// Runs the attack against every strategy with the same secret.
#[derive(Debug, Clone)]
pub struct Experiment {
    config: Config,
    secret: Vec<u8>,
}

impl Experiment {
    /// Create an experiment with a freshly generated random secret.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let secret = generate_secret(config.secret_len);
        Ok(Self { config, secret })
    }

    /// Create an experiment against a known secret.
    ///
    /// The configured secret length is replaced by the length of `secret`.
    pub fn with_secret(config: Config, secret: Vec<u8>) -> Result<Self, ConfigError> {
        let config = config.with_secret_len(secret.len());
        config.validate()?;
        Ok(Self { config, secret })
    }

    /// The experiment's configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The true secret.
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// Run the experiment.
    pub fn run(&self) -> ExperimentReport {
        self.run_with(|_| {})
    }

    /// Run the experiment, reporting progress as it happens.
    pub fn run_with<F>(&self, mut on_progress: F) -> ExperimentReport
    where
        F: FnMut(Progress<'_>),
    {
        let timer = Timer::new();
        let preflight = run_all_checks(&self.config, &timer);
        for description in preflight.descriptions() {
            warn!("{}", description);
        }

        on_progress(Progress::Started {
            secret: &self.secret,
        });

        let mut runs = Vec::with_capacity(Strategy::ALL.len());
        for strategy in Strategy::ALL {
            let run = self.run_strategy(strategy, &timer, &mut on_progress);
            on_progress(Progress::RunFinished { run: &run });
            runs.push(run);
        }

        ExperimentReport {
            config: self.config.clone(),
            secret: self.secret.clone(),
            preflight,
            runs,
        }
    }

    fn run_strategy<F>(&self, strategy: Strategy, timer: &Timer, on_progress: &mut F) -> VariantRun
    where
        F: FnMut(Progress<'_>),
    {
        on_progress(Progress::RunStarted { strategy });
        info!(
            strategy = strategy.label(),
            invocations = self.config.total_invocations(),
            "starting attack"
        );

        let comparator = strategy.comparator(&self.config);
        let mut target = Target::new(&self.secret, comparator);
        let mut attack =
            TimingAttack::with_config(self.config.clone()).with_stopwatch(timer.clone());

        let start = Instant::now();
        let recovery = attack.recover_with(&mut target, self.config.secret_len, |record| {
            on_progress(Progress::Position { strategy, record });
        });
        let elapsed_secs = start.elapsed().as_secs_f64();

        let score = recovery.score(&self.secret);
        info!(
            strategy = strategy.label(),
            correct_bytes = score.correct_bytes,
            total_bytes = score.total_bytes,
            elapsed_secs,
            "attack finished"
        );

        VariantRun {
            strategy,
            recovery,
            score,
            elapsed_secs,
        }
    }
}
