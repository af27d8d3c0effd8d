use quiz_core::model::{Difficulty, OptionKey, Username};
use services::{
    AnswerOutcome, FallbackReason, QuestionSource, QuizLoopService, QuizProgress, QuizRun,
    ScoreRecording,
};

use crate::views::ViewError;

/// Message shown after an answer is graded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Wrong { correct_answer: String },
}

impl Feedback {
    #[must_use]
    pub fn from_outcome(outcome: &AnswerOutcome) -> Self {
        if outcome.correct {
            Feedback::Correct
        } else {
            Feedback::Wrong {
                correct_answer: outcome.correct_answer.clone(),
            }
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Feedback::Correct => "Correct!".to_string(),
            Feedback::Wrong { correct_answer } => {
                format!("Wrong! The correct answer was: {correct_answer}")
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizStep {
    Continue,
    Finished,
}

/// Notice for a run that is not playing bank questions.
#[must_use]
pub fn fallback_notice(source: &QuestionSource, difficulty: Difficulty) -> Option<String> {
    match source {
        QuestionSource::Bank => None,
        QuestionSource::Fallback(FallbackReason::Empty) => Some(format!(
            "No {difficulty} questions are available yet, so you are playing the sample questions."
        )),
        QuestionSource::Fallback(FallbackReason::StorageUnavailable(_)) => Some(
            "Could not load questions from the database, so you are playing the sample questions."
                .to_string(),
        ),
    }
}

/// Screen state for one quiz run.
#[derive(Clone, Debug)]
pub struct QuizVm {
    run: QuizRun,
    selected: Option<OptionKey>,
    feedback: Option<Feedback>,
}

impl QuizVm {
    #[must_use]
    pub fn new(run: QuizRun) -> Self {
        Self {
            run,
            selected: None,
            feedback: None,
        }
    }

    pub async fn start(
        quiz_loop: &QuizLoopService,
        username: Username,
        difficulty: Difficulty,
    ) -> Self {
        Self::new(quiz_loop.start_quiz(username, difficulty).await)
    }

    #[must_use]
    pub fn notice(&self) -> Option<String> {
        fallback_notice(&self.run.source, self.run.difficulty)
    }

    #[must_use]
    pub fn prompt(&self) -> Option<&str> {
        self.run.session.current_question().map(|q| q.prompt())
    }

    /// Option labels and texts of the current question.
    #[must_use]
    pub fn options(&self) -> Vec<(OptionKey, String)> {
        self.run
            .session
            .current_question()
            .map(|q| {
                OptionKey::ALL
                    .iter()
                    .map(|key| (*key, q.option(*key).to_string()))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn selected(&self) -> Option<OptionKey> {
        self.selected
    }

    pub fn select(&mut self, key: OptionKey) {
        self.selected = Some(key);
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        self.run.session.progress()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.run.session.is_finished()
    }

    #[must_use]
    pub fn final_message(&self) -> String {
        let progress = self.progress();
        format!(
            "Quiz finished! Your score: {}/{}",
            progress.score, progress.total
        )
    }

    /// Status line for the score write, `None` while the run is in progress.
    #[must_use]
    pub fn recording_message(&self) -> Option<String> {
        match &self.run.recording {
            ScoreRecording::Pending => None,
            ScoreRecording::Recorded(entry) => Some(format!(
                "Score saved. Your average is now {:.2}.",
                entry.average_score
            )),
            ScoreRecording::Failed(_) => {
                Some("Your score could not be saved.".to_string())
            }
        }
    }

    /// Submit the selected option.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Invalid` when nothing is selected or the quiz is
    /// already over.
    pub async fn submit(&mut self, quiz_loop: &QuizLoopService) -> Result<QuizStep, ViewError> {
        let text = self.selected.and_then(|key| {
            self.run
                .session
                .current_question()
                .map(|q| q.option(key).to_string())
        });
        let result = quiz_loop.answer(&mut self.run, text.as_deref()).await?;
        self.feedback = Some(Feedback::from_outcome(&result.outcome));
        self.selected = None;
        if result.outcome.finished {
            Ok(QuizStep::Finished)
        } else {
            Ok(QuizStep::Continue)
        }
    }
}
