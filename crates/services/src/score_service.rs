use std::sync::Arc;

use quiz_core::model::{ScoreEntry, ScoreTotals, Username, mean_score};
use storage::repository::ScoreRepository;

use crate::Clock;
use crate::error::ScoreError;

/// One leaderboard line.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedScore {
    pub rank: usize,
    pub entry: ScoreEntry,
}

/// Every recorded score plus the mean of the raw scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreReport {
    pub entries: Vec<ScoreEntry>,
    pub overall_average: Option<f64>,
}

/// Persists finished quiz scores and reads score history.
#[derive(Clone)]
pub struct ScoreService {
    clock: Clock,
    scores: Arc<dyn ScoreRepository>,
}

impl ScoreService {
    #[must_use]
    pub fn new(clock: Clock, scores: Arc<dyn ScoreRepository>) -> Self {
        Self { clock, scores }
    }

    /// Append one score with the user's running average as of this entry.
    ///
    /// A failed history read counts as no history.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::Storage` if the insert fails. Nothing is retried.
    pub async fn record_score(
        &self,
        username: &Username,
        score: u32,
    ) -> Result<ScoreEntry, ScoreError> {
        let totals = match self.scores.score_totals(username).await {
            Ok(totals) => totals,
            Err(err) => {
                log::warn!("could not read score history for {username}: {err}");
                ScoreTotals::default()
            }
        };

        let entry = ScoreEntry {
            username: username.clone(),
            score,
            submitted_at: self.clock.now(),
            average_score: totals.next_average(score),
        };
        self.scores.append_score(&entry).await?;
        log::info!(
            "recorded score {score} for {username} (average {:.2})",
            entry.average_score
        );
        Ok(entry)
    }

    /// Highest scores first, ranked from 1.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::Storage` if repository access fails.
    pub async fn leaderboard(&self, limit: u32) -> Result<Vec<RankedScore>, ScoreError> {
        let entries = self.scores.list_scores(Some(limit)).await?;
        Ok(entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| RankedScore { rank: i + 1, entry })
            .collect())
    }

    /// # Errors
    ///
    /// Returns `ScoreError::Storage` if repository access fails.
    pub async fn report(&self) -> Result<ScoreReport, ScoreError> {
        let entries = self.scores.list_scores(None).await?;
        let raw: Vec<u32> = entries.iter().map(|e| e.score).collect();
        Ok(ScoreReport {
            overall_average: mean_score(&raw),
            entries,
        })
    }

    /// The snapshot stored with the user's most recent score.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::Storage` if repository access fails.
    pub async fn latest_average(&self, username: &Username) -> Result<Option<f64>, ScoreError> {
        let latest = self.scores.latest_score(username).await?;
        Ok(latest.map(|e| e.average_score))
    }
}
