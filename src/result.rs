//! Attack result types.

use serde::{Deserialize, Serialize};

use crate::statistics::rank_descending;
use crate::types::Candidate;

/// Outcome of attacking one byte position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    /// Zero-based byte position.
    pub position: usize,

    /// Candidate committed for this position.
    pub byte: Candidate,

    /// Mean duration of the committed candidate, in seconds.
    pub mean_secs: f64,

    /// Mean duration of every candidate, indexed by candidate value.
    /// Always 256 entries.
    pub candidate_means: Vec<f64>,
}

impl PositionRecord {
    /// Winning mean minus the best mean among the other candidates.
    ///
    /// Zero when a tie decided the position.
    pub fn margin(&self) -> f64 {
        let runner_up = self
            .candidate_means
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != usize::from(self.byte))
            .map(|(_, &m)| m)
            .fold(f64::NEG_INFINITY, f64::max);
        if runner_up.is_finite() {
            self.mean_secs - runner_up
        } else {
            0.0
        }
    }

    /// Candidates ordered by descending mean duration.
    pub fn ranked(&self) -> Vec<(Candidate, f64)> {
        rank_descending(&self.candidate_means)
    }
}

/// Append-only log of position records, in position order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingLog {
    records: Vec<PositionRecord>,
}

impl TimingLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty log with room for `positions` records.
    pub fn with_capacity(positions: usize) -> Self {
        Self {
            records: Vec::with_capacity(positions),
        }
    }

    /// Append a record.
    pub fn push(&mut self, record: PositionRecord) {
        self.records.push(record);
    }

    /// Number of positions recorded.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no position has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in position order.
    pub fn iter(&self) -> std::slice::Iter<'_, PositionRecord> {
        self.records.iter()
    }

    /// Record for `position`, if it was reached.
    pub fn get(&self, position: usize) -> Option<&PositionRecord> {
        self.records.get(position)
    }

    /// All records as a slice.
    pub fn records(&self) -> &[PositionRecord] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a TimingLog {
    type Item = &'a PositionRecord;
    type IntoIter = std::slice::Iter<'a, PositionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Complete result of one attack run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recovery {
    /// Recovered bytes, one per position.
    #[serde(with = "hex::serde")]
    pub secret: Vec<u8>,

    /// Per-position timing records.
    pub log: TimingLog,
}

impl Recovery {
    /// Score this recovery against the true secret.
    pub fn score(&self, truth: &[u8]) -> Score {
        Score::new(&self.secret, truth)
    }

    /// Recovered bytes as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.secret)
    }
}

/// How closely a recovered secret matches the real one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Positions where the recovered byte equals the true byte.
    pub correct_bytes: usize,

    /// Length of the true secret.
    pub total_bytes: usize,

    /// Whether the whole secret was recovered.
    pub exact: bool,
}

impl Score {
    /// Compare `recovered` against `truth` byte by byte.
    pub fn new(recovered: &[u8], truth: &[u8]) -> Self {
        let correct_bytes = recovered
            .iter()
            .zip(truth)
            .filter(|(a, b)| a == b)
            .count();
        Self {
            correct_bytes,
            total_bytes: truth.len(),
            exact: recovered == truth,
        }
    }

    /// Fraction of bytes recovered correctly.
    pub fn accuracy(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        self.correct_bytes as f64 / self.total_bytes as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(byte: u8, means: &[(u8, f64)]) -> PositionRecord {
        let mut candidate_means = vec![0.001; 256];
        for &(c, m) in means {
            candidate_means[usize::from(c)] = m;
        }
        PositionRecord {
            position: 0,
            byte,
            mean_secs: candidate_means[usize::from(byte)],
            candidate_means,
        }
    }

    #[test]
    fn test_margin_against_runner_up() {
        let rec = record(0x41, &[(0x41, 0.004), (0x10, 0.0015)]);
        assert!((rec.margin() - 0.0025).abs() < 1e-12);
    }

    #[test]
    fn test_margin_zero_on_tie() {
        let rec = record(0x00, &[]);
        assert_eq!(rec.margin(), 0.0);
    }

    #[test]
    fn test_ranked_puts_winner_first() {
        let rec = record(0x99, &[(0x99, 0.003), (0x01, 0.002)]);
        let ranked = rec.ranked();
        assert_eq!(ranked.len(), 256);
        assert_eq!(ranked[0], (0x99, 0.003));
        assert_eq!(ranked[1], (0x01, 0.002));
    }

    #[test]
    fn test_score() {
        let score = Score::new(&[1, 2, 9], &[1, 2, 3]);
        assert_eq!(score.correct_bytes, 2);
        assert_eq!(score.total_bytes, 3);
        assert!(!score.exact);
        assert!((score.accuracy() - 2.0 / 3.0).abs() < 1e-12);

        let exact = Score::new(&[1, 2, 3], &[1, 2, 3]);
        assert!(exact.exact);
        assert_eq!(exact.accuracy(), 1.0);
    }

    #[test]
    fn test_timing_log_append_order() {
        let mut log = TimingLog::with_capacity(2);
        assert!(log.is_empty());
        let mut first = record(1, &[(1, 0.002)]);
        first.position = 0;
        let mut second = record(2, &[(2, 0.003)]);
        second.position = 1;
        log.push(first);
        log.push(second);
        assert_eq!(log.len(), 2);
        let positions: Vec<usize> = log.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![0, 1]);
        assert_eq!(log.get(1).map(|r| r.byte), Some(2));
        assert!(log.get(2).is_none());
    }

    #[test]
    fn test_recovery_serializes_secret_as_hex() {
        let recovery = Recovery {
            secret: vec![0x41, 0x99],
            log: TimingLog::new(),
        };
        assert_eq!(recovery.to_hex(), "4199");
        let json = serde_json::to_string(&recovery).unwrap();
        assert!(json.contains("\"secret\":\"4199\""), "json = {}", json);
        let back: Recovery = serde_json::from_str(&json).unwrap();
        assert_eq!(back, recovery);
    }
}
