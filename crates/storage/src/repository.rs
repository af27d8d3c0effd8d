use async_trait::async_trait;
use quiz_core::model::{
    BankQuestion, Difficulty, Question, QuestionId, ScoreEntry, ScoreTotals, UserAccount, Username,
};
use rand::seq::SliceRandom;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the question bank.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Insert a new question and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the question cannot be stored.
    async fn insert_question(&self, question: &Question) -> Result<QuestionId, StorageError>;

    /// Delete a question. Returns `false` when no row had that id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn delete_question(&self, id: QuestionId) -> Result<bool, StorageError>;

    /// Change the difficulty of a question. Returns `false` when no row had that id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn update_difficulty(
        &self,
        id: QuestionId,
        difficulty: Difficulty,
    ) -> Result<bool, StorageError>;

    /// All questions ordered by id ascending.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn list_questions(&self) -> Result<Vec<BankQuestion>, StorageError>;

    /// Up to `limit` questions of the given difficulty in random order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn random_questions(
        &self,
        difficulty: Difficulty,
        limit: u32,
    ) -> Result<Vec<Question>, StorageError>;

    /// Total number of questions in the bank.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn count_questions(&self) -> Result<u64, StorageError>;
}

/// Repository contract for player accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the username is taken.
    async fn insert_user(&self, user: &UserAccount) -> Result<(), StorageError>;

    /// Fetch an account by exact username.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn get_user(&self, username: &Username) -> Result<Option<UserAccount>, StorageError>;
}

/// Append-only log of quiz results.
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Sum and count of every score previously recorded for `username`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn score_totals(&self, username: &Username) -> Result<ScoreTotals, StorageError>;

    /// Append one entry and return its row id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the entry cannot be stored.
    async fn append_score(&self, entry: &ScoreEntry) -> Result<i64, StorageError>;

    /// Entries ordered by score descending, ties by submission order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn list_scores(&self, limit: Option<u32>) -> Result<Vec<ScoreEntry>, StorageError>;

    /// Most recently submitted entry for `username`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn latest_score(&self, username: &Username) -> Result<Option<ScoreEntry>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    questions: Arc<Mutex<BTreeMap<QuestionId, Question>>>,
    next_question_id: Arc<Mutex<u64>>,
    users: Arc<Mutex<HashMap<Username, UserAccount>>>,
    scores: Arc<Mutex<Vec<(i64, ScoreEntry)>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn insert_question(&self, question: &Question) -> Result<QuestionId, StorageError> {
        let mut next = self.next_question_id.lock().map_err(poisoned)?;
        *next += 1;
        let id = QuestionId::new(*next);
        self.questions
            .lock()
            .map_err(poisoned)?
            .insert(id, question.clone());
        Ok(id)
    }

    async fn delete_question(&self, id: QuestionId) -> Result<bool, StorageError> {
        let mut guard = self.questions.lock().map_err(poisoned)?;
        Ok(guard.remove(&id).is_some())
    }

    async fn update_difficulty(
        &self,
        id: QuestionId,
        difficulty: Difficulty,
    ) -> Result<bool, StorageError> {
        let mut guard = self.questions.lock().map_err(poisoned)?;
        match guard.remove(&id) {
            Some(question) => {
                guard.insert(id, question.with_difficulty(difficulty));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_questions(&self) -> Result<Vec<BankQuestion>, StorageError> {
        let guard = self.questions.lock().map_err(poisoned)?;
        Ok(guard
            .iter()
            .map(|(id, question)| BankQuestion {
                id: *id,
                question: question.clone(),
            })
            .collect())
    }

    async fn random_questions(
        &self,
        difficulty: Difficulty,
        limit: u32,
    ) -> Result<Vec<Question>, StorageError> {
        let mut matching: Vec<Question> = {
            let guard = self.questions.lock().map_err(poisoned)?;
            guard
                .values()
                .filter(|q| q.difficulty() == difficulty)
                .cloned()
                .collect()
        };
        matching.shuffle(&mut rand::rng());
        matching.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(matching)
    }

    async fn count_questions(&self) -> Result<u64, StorageError> {
        let guard = self.questions.lock().map_err(poisoned)?;
        Ok(guard.len() as u64)
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn insert_user(&self, user: &UserAccount) -> Result<(), StorageError> {
        let mut guard = self.users.lock().map_err(poisoned)?;
        if guard.contains_key(&user.username) {
            return Err(StorageError::Conflict);
        }
        guard.insert(user.username.clone(), user.clone());
        Ok(())
    }

    async fn get_user(&self, username: &Username) -> Result<Option<UserAccount>, StorageError> {
        let guard = self.users.lock().map_err(poisoned)?;
        Ok(guard.get(username).cloned())
    }
}

#[async_trait]
impl ScoreRepository for InMemoryRepository {
    async fn score_totals(&self, username: &Username) -> Result<ScoreTotals, StorageError> {
        let guard = self.scores.lock().map_err(poisoned)?;
        let (sum, count) = guard
            .iter()
            .filter(|(_, entry)| &entry.username == username)
            .fold((0_u64, 0_u64), |(sum, count), (_, entry)| {
                (sum + u64::from(entry.score), count + 1)
            });
        Ok(ScoreTotals::new(sum, count))
    }

    async fn append_score(&self, entry: &ScoreEntry) -> Result<i64, StorageError> {
        let mut guard = self.scores.lock().map_err(poisoned)?;
        let id = i64::try_from(guard.len())
            .map_err(|_| StorageError::Serialization("score id overflow".into()))?
            + 1;
        guard.push((id, entry.clone()));
        Ok(id)
    }

    async fn list_scores(&self, limit: Option<u32>) -> Result<Vec<ScoreEntry>, StorageError> {
        let mut entries: Vec<ScoreEntry> = {
            let guard = self.scores.lock().map_err(poisoned)?;
            guard.iter().map(|(_, entry)| entry.clone()).collect()
        };
        // Stable sort keeps insertion order among equal scores.
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        if let Some(limit) = limit {
            entries.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        Ok(entries)
    }

    async fn latest_score(&self, username: &Username) -> Result<Option<ScoreEntry>, StorageError> {
        let guard = self.scores.lock().map_err(poisoned)?;
        Ok(guard
            .iter()
            .rev()
            .find(|(_, entry)| &entry.username == username)
            .map(|(_, entry)| entry.clone()))
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
    pub users: Arc<dyn UserRepository>,
    pub scores: Arc<dyn ScoreRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self {
            questions: Arc::new(repo.clone()),
            users: Arc::new(repo.clone()),
            scores: Arc::new(repo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;

    fn question(prompt: &str, difficulty: Difficulty) -> Question {
        Question::new(
            prompt,
            ["a".into(), "b".into(), "c".into(), "d".into()],
            "a",
            difficulty,
        )
    }

    fn entry(username: &str, score: u32) -> ScoreEntry {
        ScoreEntry {
            username: Username::new(username).unwrap(),
            score,
            submitted_at: fixed_now(),
            average_score: f64::from(score),
        }
    }

    #[tokio::test]
    async fn random_questions_filters_and_caps() {
        let repo = InMemoryRepository::new();
        for i in 0..15 {
            repo.insert_question(&question(&format!("easy {i}"), Difficulty::Easy))
                .await
                .unwrap();
        }
        repo.insert_question(&question("hard", Difficulty::Hard))
            .await
            .unwrap();

        let easy = repo.random_questions(Difficulty::Easy, 10).await.unwrap();
        assert_eq!(easy.len(), 10);
        assert!(easy.iter().all(|q| q.difficulty() == Difficulty::Easy));

        let medium = repo.random_questions(Difficulty::Medium, 10).await.unwrap();
        assert!(medium.is_empty());
    }

    #[tokio::test]
    async fn delete_and_update_report_missing_ids() {
        let repo = InMemoryRepository::new();
        let id = repo
            .insert_question(&question("q", Difficulty::Easy))
            .await
            .unwrap();

        assert!(repo.update_difficulty(id, Difficulty::Hard).await.unwrap());
        let listed = repo.list_questions().await.unwrap();
        assert_eq!(listed[0].question.difficulty(), Difficulty::Hard);

        assert!(repo.delete_question(id).await.unwrap());
        assert!(!repo.delete_question(id).await.unwrap());
        assert!(!repo.update_difficulty(id, Difficulty::Easy).await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_user_is_a_conflict() {
        let repo = InMemoryRepository::new();
        let user = UserAccount {
            username: Username::new("alice").unwrap(),
            password_hash: "hash".into(),
            country: "Nepal".into(),
        };
        repo.insert_user(&user).await.unwrap();
        let err = repo.insert_user(&user).await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict));
    }

    #[tokio::test]
    async fn scores_list_descending_with_totals_per_user() {
        let repo = InMemoryRepository::new();
        repo.append_score(&entry("alice", 4)).await.unwrap();
        repo.append_score(&entry("bob", 9)).await.unwrap();
        repo.append_score(&entry("alice", 6)).await.unwrap();

        let totals = repo
            .score_totals(&Username::new("alice").unwrap())
            .await
            .unwrap();
        assert_eq!(totals, ScoreTotals::new(10, 2));

        let listed = repo.list_scores(Some(2)).await.unwrap();
        let scores: Vec<u32> = listed.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![9, 6]);

        let latest = repo
            .latest_score(&Username::new("alice").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.score, 6);
    }
}
