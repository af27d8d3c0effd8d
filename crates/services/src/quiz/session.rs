use quiz_core::model::{OptionKey, Question};

use super::progress::QuizProgress;
use crate::error::QuizError;

/// Whether the session still expects answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    AwaitingAnswer,
    Finished,
}

/// Result of one accepted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub selected: String,
    pub correct_answer: String,
    pub finished: bool,
}

/// In-memory playthrough over a fixed question list.
///
/// The cursor only moves forward and never passes the end. The score is the
/// number of answers that matched the correct text exactly.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    cursor: usize,
    score: u32,
}

impl QuizSession {
    /// An empty list produces a session that is already finished.
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            cursor: 0,
            score: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> QuizState {
        if self.cursor >= self.questions.len() {
            QuizState::Finished
        } else {
            QuizState::AwaitingAnswer
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state() == QuizState::Finished
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.cursor)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let total = self.total();
        QuizProgress {
            position: (self.cursor + 1).min(total),
            total,
            score: self.score,
            is_finished: self.is_finished(),
        }
    }

    /// Grade `selected` against the current question and advance.
    ///
    /// Comparison is exact and case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Finished` once every question is answered and
    /// `QuizError::NoOptionSelected` for `None`. Neither changes the session.
    pub fn submit_answer(&mut self, selected: Option<&str>) -> Result<AnswerOutcome, QuizError> {
        let Some(question) = self.questions.get(self.cursor) else {
            return Err(QuizError::Finished);
        };
        let Some(selected) = selected else {
            return Err(QuizError::NoOptionSelected);
        };

        let correct = question.is_correct(selected);
        let correct_answer = question.correct_answer().to_string();
        if correct {
            self.score += 1;
        }
        self.cursor += 1;

        Ok(AnswerOutcome {
            correct,
            selected: selected.to_string(),
            correct_answer,
            finished: self.is_finished(),
        })
    }

    /// Submit the text of option `key` of the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Finished` once every question is answered.
    pub fn submit_option(&mut self, key: OptionKey) -> Result<AnswerOutcome, QuizError> {
        let text = self
            .current_question()
            .map(|q| q.option(key).to_string())
            .ok_or(QuizError::Finished)?;
        self.submit_answer(Some(&text))
    }
}
