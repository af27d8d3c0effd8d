use std::sync::Arc;

use quiz_core::model::{Difficulty, ScoreEntry, Username};

use super::session::{AnswerOutcome, QuizSession};
use crate::error::QuizError;
use crate::question_bank::{QuestionBankService, QuestionSource};
use crate::score_service::ScoreService;

/// Persistence status of a run's final score.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreRecording {
    Pending,
    Recorded(ScoreEntry),
    Failed(String),
}

/// A player's quiz in progress, owned by whoever drives it.
#[derive(Debug, Clone)]
pub struct QuizRun {
    pub username: Username,
    pub difficulty: Difficulty,
    pub source: QuestionSource,
    pub session: QuizSession,
    pub recording: ScoreRecording,
}

/// Result of answering a single question in a run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerResult {
    pub outcome: AnswerOutcome,
    pub recording: ScoreRecording,
}

/// Orchestrates question loading, answering, and the one score write per run.
#[derive(Clone)]
pub struct QuizLoopService {
    bank: Arc<QuestionBankService>,
    scores: Arc<ScoreService>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(bank: Arc<QuestionBankService>, scores: Arc<ScoreService>) -> Self {
        Self { bank, scores }
    }

    /// Load questions for `difficulty` and start a run.
    ///
    /// A run with no questions is finished at once and its zero score is
    /// recorded immediately.
    pub async fn start_quiz(&self, username: Username, difficulty: Difficulty) -> QuizRun {
        let set = self.bank.questions_for_play(difficulty).await;
        log::debug!(
            "starting {difficulty} quiz for {username} with {} questions",
            set.questions.len()
        );
        let mut run = QuizRun {
            username,
            difficulty,
            source: set.source,
            session: QuizSession::new(set.questions),
            recording: ScoreRecording::Pending,
        };
        if run.session.is_finished() {
            self.record_once(&mut run).await;
        }
        run
    }

    /// Answer the current question and record the score when the run ends.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` when the session rejects the answer; the run is
    /// left unchanged.
    pub async fn answer(
        &self,
        run: &mut QuizRun,
        selected: Option<&str>,
    ) -> Result<AnswerResult, QuizError> {
        let outcome = run.session.submit_answer(selected)?;
        if outcome.finished {
            self.record_once(run).await;
        }
        Ok(AnswerResult {
            outcome,
            recording: run.recording.clone(),
        })
    }

    async fn record_once(&self, run: &mut QuizRun) {
        if run.recording != ScoreRecording::Pending {
            return;
        }
        run.recording = match self
            .scores
            .record_score(&run.username, run.session.score())
            .await
        {
            Ok(entry) => ScoreRecording::Recorded(entry),
            Err(err) => {
                log::error!("failed to save score for {}: {err}", run.username);
                ScoreRecording::Failed(err.to_string())
            }
        };
    }
}
