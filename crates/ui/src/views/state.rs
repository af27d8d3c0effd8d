use dioxus::prelude::*;
use services::{AuthError, QuestionBankError, QuizError, ScoreError};

/// User-facing failure categories for every screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// Input was rejected; the message is shown as is.
    Invalid(String),
    NotFound(String),
    NotSignedIn,
    StorageUnavailable,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            ViewError::Invalid(msg) | ViewError::NotFound(msg) => msg.clone(),
            ViewError::NotSignedIn => "Please log in first.".to_string(),
            ViewError::StorageUnavailable => {
                "Could not reach the database. Please try again.".to_string()
            }
            ViewError::Unknown => "Something went wrong. Please try again.".to_string(),
        }
    }
}

impl From<AuthError> for ViewError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Storage(e) => {
                log::error!("account storage failed: {e}");
                ViewError::StorageUnavailable
            }
            AuthError::Hash(e) => {
                log::error!("password hashing failed: {e}");
                ViewError::Unknown
            }
            other => ViewError::Invalid(other.to_string()),
        }
    }
}

impl From<QuestionBankError> for ViewError {
    fn from(err: QuestionBankError) -> Self {
        match err {
            QuestionBankError::NotFound(id) => {
                ViewError::NotFound(format!("No question found with ID {id}."))
            }
            QuestionBankError::Question(e) => ViewError::Invalid(e.to_string()),
            QuestionBankError::Storage(e) => {
                log::error!("question storage failed: {e}");
                ViewError::StorageUnavailable
            }
            _ => ViewError::Unknown,
        }
    }
}

impl From<ScoreError> for ViewError {
    fn from(err: ScoreError) -> Self {
        log::error!("score storage failed: {err}");
        ViewError::StorageUnavailable
    }
}

impl From<QuizError> for ViewError {
    fn from(err: QuizError) -> Self {
        ViewError::Invalid(err.to_string())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
