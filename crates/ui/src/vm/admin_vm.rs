use quiz_core::model::{BankQuestion, Difficulty, OptionKey, QuestionDraft, QuestionId};

use crate::views::ViewError;

/// Raw text of the add-question form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestionFormVm {
    pub prompt: String,
    pub options: [String; 4],
    pub correct_answer: String,
    /// Empty until the admin picks one.
    pub difficulty: String,
}

impl QuestionFormVm {
    /// Build a draft; blank fields are left for the service to reject.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Invalid` for an unknown difficulty label.
    pub fn to_draft(&self) -> Result<QuestionDraft, ViewError> {
        let difficulty = if self.difficulty.trim().is_empty() {
            None
        } else {
            Some(parse_difficulty(&self.difficulty)?)
        };
        Ok(QuestionDraft {
            prompt: self.prompt.clone(),
            options: self.options.clone(),
            correct_answer: self.correct_answer.clone(),
            difficulty,
        })
    }
}

/// # Errors
///
/// Returns `ViewError::Invalid` when `raw` is not a whole number.
pub fn parse_question_id(raw: &str) -> Result<QuestionId, ViewError> {
    raw.parse::<QuestionId>()
        .map_err(|_| ViewError::Invalid("Please enter a valid question ID.".to_string()))
}

/// # Errors
///
/// Returns `ViewError::Invalid` unless `raw` is Easy, Medium or Hard.
pub fn parse_difficulty(raw: &str) -> Result<Difficulty, ViewError> {
    raw.parse::<Difficulty>().map_err(|_| {
        ViewError::Invalid("Invalid difficulty. Choose Easy, Medium or Hard.".to_string())
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionRowVm {
    pub id: u64,
    pub prompt: String,
    pub options: [String; 4],
    pub correct_answer: String,
    pub difficulty: &'static str,
}

impl From<&BankQuestion> for QuestionRowVm {
    fn from(item: &BankQuestion) -> Self {
        let q = &item.question;
        Self {
            id: item.id.value(),
            prompt: q.prompt().to_string(),
            options: OptionKey::ALL.map(|key| q.option(key).to_string()),
            correct_answer: q.correct_answer().to_string(),
            difficulty: q.difficulty().as_str(),
        }
    }
}

#[must_use]
pub fn map_question_rows(items: &[BankQuestion]) -> Vec<QuestionRowVm> {
    items.iter().map(QuestionRowVm::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Question;

    #[test]
    fn non_numeric_ids_are_rejected() {
        assert_eq!(parse_question_id(" 12 ").unwrap(), QuestionId::new(12));
        assert!(matches!(parse_question_id("abc"), Err(ViewError::Invalid(_))));
        assert!(parse_question_id("-1").is_err());
    }

    #[test]
    fn form_leaves_blank_difficulty_unset() {
        let form = QuestionFormVm {
            prompt: "q".into(),
            ..QuestionFormVm::default()
        };
        assert_eq!(form.to_draft().unwrap().difficulty, None);

        let form = QuestionFormVm {
            difficulty: "medium".into(),
            ..QuestionFormVm::default()
        };
        assert_eq!(form.to_draft().unwrap().difficulty, Some(Difficulty::Medium));

        let form = QuestionFormVm {
            difficulty: "extreme".into(),
            ..QuestionFormVm::default()
        };
        assert!(form.to_draft().is_err());
    }

    #[test]
    fn rows_expose_every_column() {
        let item = BankQuestion {
            id: QuestionId::new(3),
            question: Question::new(
                "Largest ocean?",
                [
                    "Atlantic".into(),
                    "Indian".into(),
                    "Arctic".into(),
                    "Pacific".into(),
                ],
                "Pacific",
                Difficulty::Easy,
            ),
        };
        let rows = map_question_rows(&[item]);
        assert_eq!(rows[0].id, 3);
        assert_eq!(rows[0].options[3], "Pacific");
        assert_eq!(rows[0].difficulty, "Easy");
    }
}
