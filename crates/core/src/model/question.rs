use thiserror::Error;

use crate::model::difficulty::Difficulty;
use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("all fields are required to add a question (missing: {0})")]
    MissingField(&'static str),
}

//
// ─── OPTION KEYS ───────────────────────────────────────────────────────────────
//

/// One of the four answer slots of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    A,
    B,
    C,
    D,
}

impl OptionKey {
    pub const ALL: [OptionKey; 4] = [OptionKey::A, OptionKey::B, OptionKey::C, OptionKey::D];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            OptionKey::A => 0,
            OptionKey::B => 1,
            OptionKey::C => 2,
            OptionKey::D => 3,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            OptionKey::A => "A",
            OptionKey::B => "B",
            OptionKey::C => "C",
            OptionKey::D => "D",
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question as served to a player.
///
/// The correct answer is stored as option *text*, not as a key. Nothing forces
/// it to equal one of the four options; [`Question::correct_option`] returns
/// `None` when it does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: [String; 4],
    correct_answer: String,
    difficulty: Difficulty,
}

impl Question {
    /// Builds a question without validation (rows loaded from storage, built-in samples).
    #[must_use]
    pub fn new(
        prompt: impl Into<String>,
        options: [String; 4],
        correct_answer: impl Into<String>,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            options,
            correct_answer: correct_answer.into(),
            difficulty,
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String; 4] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, key: OptionKey) -> &str {
        &self.options[key.index()]
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Exact, case-sensitive comparison against the correct answer text.
    #[must_use]
    pub fn is_correct(&self, selected: &str) -> bool {
        selected == self.correct_answer
    }

    /// First option slot whose text equals the correct answer, if any.
    #[must_use]
    pub fn correct_option(&self) -> Option<OptionKey> {
        OptionKey::ALL
            .into_iter()
            .find(|key| self.option(*key) == self.correct_answer)
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }
}

/// A question together with its bank identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankQuestion {
    pub id: QuestionId,
    pub question: Question,
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Raw admin input for a new question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    pub prompt: String,
    pub options: [String; 4],
    pub correct_answer: String,
    pub difficulty: Option<Difficulty>,
}

impl QuestionDraft {
    /// Trim every field and require all of them to be present.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::MissingField` naming the first empty field.
    pub fn validate(self) -> Result<Question, QuestionError> {
        let prompt = required("question", &self.prompt)?;
        let [a, b, c, d] = &self.options;
        let options = [
            required("option A", a)?,
            required("option B", b)?,
            required("option C", c)?,
            required("option D", d)?,
        ];
        let correct_answer = required("correct answer", &self.correct_answer)?;
        let difficulty = self
            .difficulty
            .ok_or(QuestionError::MissingField("difficulty"))?;

        Ok(Question {
            prompt,
            options,
            correct_answer,
            difficulty,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, QuestionError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(QuestionError::MissingField(field));
    }
    Ok(trimmed.to_string())
}
