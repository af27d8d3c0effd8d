use std::sync::Arc;

use quiz_core::model::{BankQuestion, Difficulty, Question, QuestionDraft, QuestionId};
use quiz_core::samples::fallback_questions;
use rand::seq::SliceRandom;
use storage::repository::QuestionRepository;

use crate::error::QuestionBankError;

/// Maximum number of questions served for one quiz.
pub const PLAY_QUESTION_LIMIT: u32 = 10;

/// Why the built-in sample questions were served instead of the bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    Empty,
    StorageUnavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionSource {
    Bank,
    Fallback(FallbackReason),
}

/// Questions selected for one quiz, in play order.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSet {
    pub questions: Vec<Question>,
    pub source: QuestionSource,
}

impl QuestionSet {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, QuestionSource::Fallback(_))
    }
}

/// Serves quiz questions and lets administrators manage the bank.
#[derive(Clone)]
pub struct QuestionBankService {
    questions: Arc<dyn QuestionRepository>,
}

impl QuestionBankService {
    #[must_use]
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    /// Up to `PLAY_QUESTION_LIMIT` shuffled questions of the given difficulty.
    ///
    /// Never fails: an empty bank or a storage error yields the five sample
    /// questions, shuffled and unfiltered, with the reason in `source`.
    pub async fn questions_for_play(&self, difficulty: Difficulty) -> QuestionSet {
        let source = match self
            .questions
            .random_questions(difficulty, PLAY_QUESTION_LIMIT)
            .await
        {
            Ok(mut questions) if !questions.is_empty() => {
                questions.shuffle(&mut rand::rng());
                return QuestionSet {
                    questions,
                    source: QuestionSource::Bank,
                };
            }
            Ok(_) => {
                log::info!("no {difficulty} questions in the bank, using samples");
                FallbackReason::Empty
            }
            Err(err) => {
                log::warn!("failed to load {difficulty} questions: {err}");
                FallbackReason::StorageUnavailable(err.to_string())
            }
        };

        let mut questions = fallback_questions();
        questions.shuffle(&mut rand::rng());
        QuestionSet {
            questions,
            source: QuestionSource::Fallback(source),
        }
    }

    /// Validate and store a new question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError::Question` when a field is blank.
    /// Returns `QuestionBankError::Storage` if persistence fails.
    pub async fn add_question(&self, draft: QuestionDraft) -> Result<QuestionId, QuestionBankError> {
        let question = draft.validate()?;
        let id = self.questions.insert_question(&question).await?;
        log::info!("added question {id} ({})", question.difficulty());
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns `QuestionBankError::NotFound` if no question has this id.
    /// Returns `QuestionBankError::Storage` if repository access fails.
    pub async fn delete_question(&self, id: QuestionId) -> Result<(), QuestionBankError> {
        if self.questions.delete_question(id).await? {
            log::info!("deleted question {id}");
            Ok(())
        } else {
            Err(QuestionBankError::NotFound(id))
        }
    }

    /// # Errors
    ///
    /// Returns `QuestionBankError::NotFound` if no question has this id.
    /// Returns `QuestionBankError::Storage` if repository access fails.
    pub async fn update_difficulty(
        &self,
        id: QuestionId,
        difficulty: Difficulty,
    ) -> Result<(), QuestionBankError> {
        if self.questions.update_difficulty(id, difficulty).await? {
            log::info!("question {id} moved to {difficulty}");
            Ok(())
        } else {
            Err(QuestionBankError::NotFound(id))
        }
    }

    /// All questions ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError::Storage` if repository access fails.
    pub async fn list_questions(&self) -> Result<Vec<BankQuestion>, QuestionBankError> {
        Ok(self.questions.list_questions().await?)
    }

    /// # Errors
    ///
    /// Returns `QuestionBankError::Storage` if repository access fails.
    pub async fn count_questions(&self) -> Result<u64, QuestionBankError> {
        Ok(self.questions.count_questions().await?)
    }

    /// Insert every question in `seed` if the bank is empty.
    ///
    /// Returns the number of inserted questions; zero when the bank already
    /// had content.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError::Storage` if repository access fails.
    pub async fn seed_if_empty(&self, seed: Vec<Question>) -> Result<usize, QuestionBankError> {
        let existing = self.questions.count_questions().await?;
        if existing > 0 {
            log::info!("question bank already holds {existing} questions, skipping seed");
            return Ok(0);
        }
        for question in &seed {
            self.questions.insert_question(question).await?;
        }
        log::info!("seeded {} questions", seed.len());
        Ok(seed.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::OptionKey;
    use quiz_core::samples::{FALLBACK_QUESTION_COUNT, seed_questions};
    use storage::repository::{InMemoryRepository, StorageError};

    struct FailingQuestions;

    #[async_trait::async_trait]
    impl QuestionRepository for FailingQuestions {
        async fn insert_question(&self, _: &Question) -> Result<QuestionId, StorageError> {
            Err(StorageError::Connection("down".into()))
        }
        async fn delete_question(&self, _: QuestionId) -> Result<bool, StorageError> {
            Err(StorageError::Connection("down".into()))
        }
        async fn update_difficulty(
            &self,
            _: QuestionId,
            _: Difficulty,
        ) -> Result<bool, StorageError> {
            Err(StorageError::Connection("down".into()))
        }
        async fn list_questions(&self) -> Result<Vec<BankQuestion>, StorageError> {
            Err(StorageError::Connection("down".into()))
        }
        async fn random_questions(
            &self,
            _: Difficulty,
            _: u32,
        ) -> Result<Vec<Question>, StorageError> {
            Err(StorageError::Connection("down".into()))
        }
        async fn count_questions(&self) -> Result<u64, StorageError> {
            Err(StorageError::Connection("down".into()))
        }
    }

    fn draft(prompt: &str, difficulty: Option<Difficulty>) -> QuestionDraft {
        QuestionDraft {
            prompt: prompt.into(),
            options: ["1".into(), "2".into(), "3".into(), "4".into()],
            correct_answer: "2".into(),
            difficulty,
        }
    }

    #[tokio::test]
    async fn empty_bank_falls_back_to_five_samples() {
        let bank = QuestionBankService::new(Arc::new(InMemoryRepository::new()));
        let set = bank.questions_for_play(Difficulty::Hard).await;
        assert_eq!(set.questions.len(), FALLBACK_QUESTION_COUNT);
        assert_eq!(set.source, QuestionSource::Fallback(FallbackReason::Empty));
    }

    #[tokio::test]
    async fn other_difficulties_do_not_count_as_matches() {
        let bank = QuestionBankService::new(Arc::new(InMemoryRepository::new()));
        bank.add_question(draft("e", Some(Difficulty::Easy)))
            .await
            .unwrap();

        let set = bank.questions_for_play(Difficulty::Hard).await;
        assert_eq!(set.questions.len(), FALLBACK_QUESTION_COUNT);
        assert_eq!(set.source, QuestionSource::Fallback(FallbackReason::Empty));
        assert!(set.questions.iter().all(|q| q.prompt() != "e"));
    }

    #[tokio::test]
    async fn storage_failure_falls_back_to_five_samples() {
        let bank = QuestionBankService::new(Arc::new(FailingQuestions));
        let set = bank.questions_for_play(Difficulty::Easy).await;
        assert_eq!(set.questions.len(), FALLBACK_QUESTION_COUNT);
        assert!(matches!(
            set.source,
            QuestionSource::Fallback(FallbackReason::StorageUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn play_set_is_capped_and_filtered() {
        let bank = QuestionBankService::new(Arc::new(InMemoryRepository::new()));
        for i in 0..14 {
            bank.add_question(draft(&format!("m{i}"), Some(Difficulty::Medium)))
                .await
                .unwrap();
        }
        bank.add_question(draft("e", Some(Difficulty::Easy)))
            .await
            .unwrap();

        let set = bank.questions_for_play(Difficulty::Medium).await;
        assert_eq!(set.source, QuestionSource::Bank);
        assert_eq!(set.questions.len(), PLAY_QUESTION_LIMIT as usize);
        assert!(set.questions.iter().all(|q| q.difficulty() == Difficulty::Medium));
    }

    #[tokio::test]
    async fn add_requires_every_field() {
        let bank = QuestionBankService::new(Arc::new(InMemoryRepository::new()));
        let err = bank.add_question(draft("q", None)).await.unwrap_err();
        assert!(matches!(err, QuestionBankError::Question(_)));

        let mut blank_option = draft("q", Some(Difficulty::Easy));
        blank_option.options[OptionKey::C.index()] = "  ".into();
        assert!(bank.add_question(blank_option).await.is_err());
        assert_eq!(bank.count_questions().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn missing_ids_report_not_found() {
        let bank = QuestionBankService::new(Arc::new(InMemoryRepository::new()));
        let id = bank
            .add_question(draft("q", Some(Difficulty::Easy)))
            .await
            .unwrap();

        bank.update_difficulty(id, Difficulty::Hard).await.unwrap();
        assert_eq!(
            bank.list_questions().await.unwrap()[0].question.difficulty(),
            Difficulty::Hard
        );

        bank.delete_question(id).await.unwrap();
        assert!(matches!(
            bank.delete_question(id).await,
            Err(QuestionBankError::NotFound(missing)) if missing == id
        ));
        assert!(matches!(
            bank.update_difficulty(QuestionId::new(99), Difficulty::Easy).await,
            Err(QuestionBankError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn seed_only_fills_an_empty_bank() {
        let bank = QuestionBankService::new(Arc::new(InMemoryRepository::new()));
        let seeded = bank.seed_if_empty(seed_questions()).await.unwrap();
        assert_eq!(seeded, seed_questions().len());
        assert_eq!(bank.seed_if_empty(seed_questions()).await.unwrap(), 0);
        assert_eq!(bank.count_questions().await.unwrap(), seeded as u64);
    }
}
