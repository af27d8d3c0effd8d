use std::sync::Arc;

use quiz_core::model::{Difficulty, QuestionDraft, ScoreEntry, ScoreTotals, Username};
use quiz_core::time::fixed_now;
use services::{AdminCredentials, AppServices, Clock};
use storage::repository::{InMemoryRepository, ScoreRepository, Storage, StorageError};

use super::test_harness::{
    ViewKind, admin, player, setup_view_harness, setup_view_harness_with_services,
};

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_form() {
    let mut harness = setup_view_harness(ViewKind::Login, None);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Username"), "missing username field in {html}");
    assert!(html.contains("Password"), "missing password field in {html}");
    assert!(html.contains("Create an account"), "missing signup link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn signup_view_smoke_renders_country() {
    let mut harness = setup_view_harness(ViewKind::Signup, None);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Country"), "missing country field in {html}");
    assert!(html.contains("Register"), "missing register button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_greets_player() {
    let mut harness = setup_view_harness(ViewKind::Home, Some(player("alice")));
    let alice = Username::new("alice").unwrap();
    harness.services.scores().record_score(&alice, 4).await.unwrap();
    harness.services.scores().record_score(&alice, 6).await.unwrap();

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Welcome, alice!"), "missing greeting in {html}");
    assert!(html.contains("Start Quiz"), "missing start button in {html}");
    assert!(html.contains("5.00"), "missing average in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_requires_login() {
    let mut harness = setup_view_harness(ViewKind::Home, None);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Please log in first."), "missing prompt in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn play_view_smoke_shows_first_sample_question() {
    let mut harness = setup_view_harness(ViewKind::Play(Difficulty::Hard), Some(player("bob")));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 5"), "missing progress in {html}");
    assert!(html.contains("sample questions"), "missing fallback notice in {html}");
    assert!(html.contains("Submit Answer"), "missing submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn play_view_smoke_points_admins_to_dashboard() {
    let mut harness = setup_view_harness(ViewKind::Play(Difficulty::Easy), Some(admin()));
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Administrators do not play quizzes."),
        "missing admin notice in {html}"
    );
    assert!(html.contains("Go to dashboard"), "missing dashboard link in {html}");
    assert!(!html.contains("Please log in first."), "wrong prompt in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_points_admins_to_dashboard() {
    let mut harness = setup_view_harness(ViewKind::Home, Some(admin()));
    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("Administrators do not play quizzes."),
        "missing admin notice in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn leaderboard_view_smoke_lists_scores() {
    let mut harness = setup_view_harness(ViewKind::Leaderboard, Some(player("alice")));
    let scores = harness.services.scores();
    scores
        .record_score(&Username::new("alice").unwrap(), 3)
        .await
        .unwrap();
    scores
        .record_score(&Username::new("bob").unwrap(), 8)
        .await
        .unwrap();

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Rank"), "missing header in {html}");
    assert!(html.contains("bob"), "missing bob in {html}");
    assert!(html.contains("alice"), "missing alice in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_smoke_lists_questions_and_report() {
    let mut harness = setup_view_harness(ViewKind::Admin, Some(admin()));
    harness
        .services
        .question_bank()
        .add_question(QuestionDraft {
            prompt: "How many continents are there?".into(),
            options: ["5".into(), "6".into(), "7".into(), "8".into()],
            correct_answer: "7".into(),
            difficulty: Some(Difficulty::Medium),
        })
        .await
        .unwrap();
    let scores = harness.services.scores();
    scores
        .record_score(&Username::new("alice").unwrap(), 4)
        .await
        .unwrap();
    scores
        .record_score(&Username::new("bob").unwrap(), 8)
        .await
        .unwrap();

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Admin Dashboard"), "missing title in {html}");
    assert!(
        html.contains("How many continents are there?"),
        "missing question in {html}"
    );
    assert!(
        html.contains("Overall average score: 6.00"),
        "missing average in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_smoke_rejects_players() {
    let mut harness = setup_view_harness(ViewKind::Admin, Some(player("alice")));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Administrators only."), "missing guard in {html}");
}

struct FailingScores;

#[async_trait::async_trait]
impl ScoreRepository for FailingScores {
    async fn score_totals(&self, _username: &Username) -> Result<ScoreTotals, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn append_score(&self, _entry: &ScoreEntry) -> Result<i64, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_scores(&self, _limit: Option<u32>) -> Result<Vec<ScoreEntry>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn latest_score(&self, _username: &Username) -> Result<Option<ScoreEntry>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn leaderboard_view_smoke_renders_error_state() {
    let repo = InMemoryRepository::new();
    let storage = Storage {
        questions: Arc::new(repo.clone()),
        users: Arc::new(repo),
        scores: Arc::new(FailingScores),
    };
    let services = AppServices::from_storage(
        &storage,
        Clock::fixed(fixed_now()),
        AdminCredentials::default(),
    );
    let mut harness =
        setup_view_harness_with_services(ViewKind::Leaderboard, Some(player("alice")), services);
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Could not reach the database"),
        "missing error in {html}"
    );
    assert!(html.contains("Retry"), "missing retry in {html}");
}
