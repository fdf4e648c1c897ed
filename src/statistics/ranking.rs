//! Candidate ranking by mean duration.

use crate::types::Candidate;

/// Tracks the candidate with the strictly greatest score seen so far.
///
/// A later candidate only takes the lead with a strictly greater score, so
/// on ties the first candidate to reach the maximum wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct Leader {
    best: Option<(Candidate, f64)>,
}

impl Leader {
    /// Create an empty leader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a candidate and its score.
    pub fn observe(&mut self, candidate: Candidate, score: f64) {
        match self.best {
            Some((_, best)) if score <= best => {}
            _ => self.best = Some((candidate, score)),
        }
    }

    /// The current leader and its score, if any candidate was observed.
    pub fn best(&self) -> Option<(Candidate, f64)> {
        self.best
    }
}

/// Rank candidates by descending score.
///
/// `scores[i]` is the score of candidate `i`. The sort is stable, so equal
/// scores keep ascending candidate order.
pub fn rank_descending(scores: &[f64]) -> Vec<(Candidate, f64)> {
    let mut ranked: Vec<(Candidate, f64)> = scores
        .iter()
        .take(usize::from(Candidate::MAX) + 1)
        .enumerate()
        .map(|(i, &score)| (i as Candidate, score))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked
}
