//! JSON serialization for experiment reports and timing logs.

use crate::experiment::ExperimentReport;
use crate::result::TimingLog;

/// Serialize an ExperimentReport to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for ExperimentReport).
pub fn to_json(report: &ExperimentReport) -> Result<String, serde_json::Error> {
    serde_json::to_string(report)
}

/// Serialize an ExperimentReport to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for ExperimentReport).
pub fn to_json_pretty(report: &ExperimentReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Serialize a TimingLog on its own, for post-hoc analysis of one run.
pub fn log_to_json(log: &TimingLog) -> Result<String, serde_json::Error> {
    serde_json::to_string(log)
}
