//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{QuestionError, QuestionId, UserError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("all fields are required")]
    MissingFields,
    #[error("username '{0}' is reserved")]
    ReservedUsername(String),
    #[error("username '{0}' is already taken")]
    UsernameTaken(String),
    #[error("invalid admin password")]
    InvalidAdminPassword,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error(transparent)]
    User(UserError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::MissingFields => Self::MissingFields,
            UserError::ReservedUsername(name) => Self::ReservedUsername(name),
            other => Self::User(other),
        }
    }
}

/// Errors emitted by `QuestionBankService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionBankError {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error("no question with id {0}")]
    NotFound(QuestionId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Rejections from the quiz session driver. The session is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz already finished")]
    Finished,
    #[error("please select an answer")]
    NoOptionSelected,
}

/// Errors emitted by `ScoreService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    QuestionBank(#[from] QuestionBankError),
}
