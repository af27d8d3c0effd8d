use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::auth_service::{AdminCredentials, AuthService};
use crate::error::AppServicesError;
use crate::question_bank::QuestionBankService;
use crate::quiz::QuizLoopService;
use crate::score_service::ScoreService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    auth: Arc<AuthService>,
    question_bank: Arc<QuestionBankService>,
    scores: Arc<ScoreService>,
    quiz_loop: Arc<QuizLoopService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if connecting or migrating fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        admin: AdminCredentials,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock, admin))
    }

    #[must_use]
    pub fn in_memory(clock: Clock, admin: AdminCredentials) -> Self {
        Self::from_storage(&Storage::in_memory(), clock, admin)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock, admin: AdminCredentials) -> Self {
        let auth = Arc::new(AuthService::new(admin, Arc::clone(&storage.users)));
        let question_bank = Arc::new(QuestionBankService::new(Arc::clone(&storage.questions)));
        let scores = Arc::new(ScoreService::new(clock, Arc::clone(&storage.scores)));
        let quiz_loop = Arc::new(QuizLoopService::new(
            Arc::clone(&question_bank),
            Arc::clone(&scores),
        ));

        Self {
            auth,
            question_bank,
            scores,
            quiz_loop,
        }
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn question_bank(&self) -> Arc<QuestionBankService> {
        Arc::clone(&self.question_bank)
    }

    #[must_use]
    pub fn scores(&self) -> Arc<ScoreService> {
        Arc::clone(&self.scores)
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}
