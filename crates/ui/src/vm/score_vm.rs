use quiz_core::model::ScoreEntry;
use services::{RankedScore, ScoreReport};

use crate::vm::time_fmt::{format_average, format_datetime};

/// Number of rows on the player leaderboard.
pub const LEADERBOARD_LIMIT: u32 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreRowVm {
    pub rank: usize,
    pub username: String,
    pub score: u32,
    pub average_str: String,
    pub submitted_at_str: String,
}

impl ScoreRowVm {
    fn from_entry(rank: usize, entry: &ScoreEntry) -> Self {
        Self {
            rank,
            username: entry.username.as_str().to_string(),
            score: entry.score,
            average_str: format_average(entry.average_score),
            submitted_at_str: format_datetime(entry.submitted_at),
        }
    }
}

#[must_use]
pub fn map_leaderboard(items: &[RankedScore]) -> Vec<ScoreRowVm> {
    items
        .iter()
        .map(|item| ScoreRowVm::from_entry(item.rank, &item.entry))
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportVm {
    pub rows: Vec<ScoreRowVm>,
    pub overall_average_str: String,
}

#[must_use]
pub fn map_report(report: &ScoreReport) -> ReportVm {
    let rows = report
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| ScoreRowVm::from_entry(i + 1, entry))
        .collect();
    let overall_average_str = report
        .overall_average
        .map_or_else(|| "N/A".to_string(), format_average);
    ReportVm {
        rows,
        overall_average_str,
    }
}
