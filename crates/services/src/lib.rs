#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth_service;
pub mod error;
pub mod question_bank;
pub mod quiz;
pub mod score_service;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use auth_service::{AdminCredentials, AuthService, Session};
pub use error::{AppServicesError, AuthError, QuestionBankError, QuizError, ScoreError};
pub use question_bank::{
    FallbackReason, PLAY_QUESTION_LIMIT, QuestionBankService, QuestionSet, QuestionSource,
};
pub use quiz::{
    AnswerOutcome, AnswerResult, QuizLoopService, QuizProgress, QuizRun, QuizSession, QuizState,
    ScoreRecording,
};
pub use score_service::{RankedScore, ScoreReport, ScoreService};
