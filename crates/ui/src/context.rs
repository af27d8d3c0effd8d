use std::sync::Arc;

use dioxus::prelude::*;
use quiz_core::model::Username;
use services::{AuthService, QuestionBankService, QuizLoopService, ScoreService, Session};

pub trait UiApp: Send + Sync {
    fn auth(&self) -> Arc<AuthService>;
    fn question_bank(&self) -> Arc<QuestionBankService>;
    fn scores(&self) -> Arc<ScoreService>;
    fn quiz_loop(&self) -> Arc<QuizLoopService>;
}

#[derive(Clone)]
pub struct AppContext {
    auth: Arc<AuthService>,
    question_bank: Arc<QuestionBankService>,
    scores: Arc<ScoreService>,
    quiz_loop: Arc<QuizLoopService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            auth: app.auth(),
            question_bank: app.question_bank(),
            scores: app.scores(),
            quiz_loop: app.quiz_loop(),
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

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// Who is signed in, shared by every screen.
///
/// Must be created inside a component scope.
#[derive(Clone, Copy, PartialEq)]
pub struct CurrentUser(Signal<Option<Session>>);

impl CurrentUser {
    #[must_use]
    pub fn new(initial: Option<Session>) -> Self {
        Self(Signal::new(initial))
    }

    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.0.read().clone()
    }

    /// The signed-in player's name. Administrators do not play.
    #[must_use]
    pub fn player(&self) -> Option<Username> {
        match self.session() {
            Some(Session::Player(name)) => Some(name),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.0.read().as_ref().is_some_and(Session::is_admin)
    }

    pub fn sign_in(&mut self, session: Session) {
        self.0.set(Some(session));
    }

    pub fn sign_out(&mut self) {
        self.0.set(None);
    }
}
