//! Terminal transcript formatting with colors.

use std::io::{self, Write};

use colored::Colorize;

use crate::experiment::{ExperimentReport, Progress, VariantRun};
use crate::preflight::PreflightResult;
use crate::result::PositionRecord;
use crate::types::Strategy;

/// Format the true secret line.
pub fn format_secret(secret: &[u8]) -> String {
    format!("Secret: {}\n", hex::encode(secret).bold())
}

/// Format the heading printed before attacking `strategy`.
pub fn format_run_heading(strategy: Strategy) -> String {
    let sep = "\u{2500}".repeat(62);
    format!(
        "\n{}\n{}\n{}\n",
        format!("Attacking {} comparator", strategy.label()).bold(),
        sep,
        "  pos  byte  mean (s)     margin (s)".dimmed()
    )
}

/// Format one committed position.
pub fn format_position(record: &PositionRecord) -> String {
    format!(
        "  {:>3}  0x{:02x}  {:.8}  {:+.8}\n",
        record.position,
        record.byte,
        record.mean_secs,
        record.margin()
    )
}

/// Format the recovered secret, score and elapsed time of a run.
pub fn format_run_summary(run: &VariantRun) -> String {
    let recovered = run.recovery.to_hex();
    let recovered = if run.score.exact {
        recovered.green().bold().to_string()
    } else {
        recovered.red().to_string()
    };

    let mut output = String::new();
    output.push_str(&format!("  Recovered: {}\n", recovered));
    output.push_str(&format!(
        "  Correct:   {}/{} bytes\n",
        run.score.correct_bytes, run.score.total_bytes
    ));
    output.push_str(&format!("  Elapsed:   {:.2} s\n", run.elapsed_secs));
    output
}

/// Format preflight warnings. Empty when there are none.
pub fn format_preflight(preflight: &PreflightResult) -> String {
    let mut output = String::new();
    if !preflight.has_warnings() {
        return output;
    }
    output.push_str(&format!("{}\n", "Preflight warnings:".yellow().bold()));
    for description in preflight.descriptions() {
        output.push_str(&format!("  \u{26A0} {}\n", description));
    }
    output
}

/// Format a complete experiment report.
///
/// Produces the same text as a [`Transcript`] fed the experiment's
/// progress events, preceded by any preflight warnings.
pub fn format_report(report: &ExperimentReport) -> String {
    let mut output = format_preflight(&report.preflight);
    output.push_str(&format_secret(&report.secret));
    for run in &report.runs {
        output.push_str(&format_run_heading(run.strategy));
        for record in &run.recovery.log {
            output.push_str(&format_position(record));
        }
        output.push_str(&format_run_summary(run));
    }
    output
}

/// Writes experiment progress to `writer` as it happens.
///
/// Progress callbacks cannot fail, so the first write error is kept and
/// every later event is dropped. Call [`Transcript::finish`] to surface it.
pub struct Transcript<W: Write> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: Write> Transcript<W> {
    /// Create a transcript writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Render one progress event.
    pub fn on_event(&mut self, event: Progress<'_>) {
        if self.error.is_some() {
            return;
        }
        let text = match event {
            Progress::Started { secret } => format_secret(secret),
            Progress::RunStarted { strategy } => format_run_heading(strategy),
            Progress::Position { record, .. } => format_position(record),
            Progress::RunFinished { run } => format_run_summary(run),
        };
        if let Err(e) = self.writer.write_all(text.as_bytes()).and_then(|_| self.writer.flush()) {
            self.error = Some(e);
        }
    }

    /// Return the writer, or the first write error.
    pub fn finish(self) -> io::Result<W> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.writer),
        }
    }
}
