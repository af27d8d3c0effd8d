use chrono::{DateTime, Utc};

use crate::model::user::Username;

/// One persisted quiz result.
///
/// `average_score` is the user's mean across all submissions up to and
/// including this one, frozen at submission time. It is never recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEntry {
    pub username: Username,
    pub score: u32,
    pub submitted_at: DateTime<Utc>,
    pub average_score: f64,
}

/// Sum and count of a user's earlier scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreTotals {
    pub sum: u64,
    pub count: u64,
}

impl ScoreTotals {
    #[must_use]
    pub fn new(sum: u64, count: u64) -> Self {
        Self { sum, count }
    }

    /// Running average after appending `score` to this history.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn next_average(self, score: u32) -> f64 {
        let sum = self.sum + u64::from(score);
        let count = self.count + 1;
        sum as f64 / count as f64
    }
}

/// Mean of raw scores, `None` for an empty slice.
///
/// This is the aggregate to use for "current average"; averaging the stored
/// snapshots would weight early submissions more than once.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean_score(scores: &[u32]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let total: u64 = scores.iter().map(|s| u64::from(*s)).sum();
    Some(total as f64 / scores.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_submission_average_is_the_score() {
        assert!((ScoreTotals::default().next_average(7) - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn second_submission_averages_with_history() {
        let after_first = ScoreTotals::new(4, 1);
        assert!((after_first.next_average(6) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn mean_score_of_empty_is_none() {
        assert_eq!(mean_score(&[]), None);
        assert_eq!(mean_score(&[2, 3]), Some(2.5));
    }
}
