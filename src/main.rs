//! Run one experiment against both comparators and print the transcript.

use std::io;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use compare_oracle::output::Transcript;
use compare_oracle::{Config, Experiment};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let experiment =
        Experiment::new(Config::default()).context("invalid experiment configuration")?;

    let mut transcript = Transcript::new(io::stdout().lock());
    experiment.run_with(|event| transcript.on_event(event));
    let _stdout = transcript
        .finish()
        .context("failed to write transcript to stdout")?;

    Ok(())
}
