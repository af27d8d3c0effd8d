use std::sync::Arc;

use quiz_core::model::{Difficulty, Question, Username};
use quiz_core::time::fixed_now;
use services::{
    AdminCredentials, AppServices, Clock, QuestionBankService, QuestionSource, QuizError,
    QuizLoopService, ScoreRecording, ScoreService,
};
use storage::repository::{InMemoryRepository, QuestionRepository, ScoreRepository};

fn question(prompt: &str, correct: &str) -> Question {
    Question::new(
        prompt,
        ["3".into(), "4".into(), "5".into(), "6".into()],
        correct,
        Difficulty::Easy,
    )
}

#[tokio::test]
async fn quiz_loop_records_score_once() {
    let repo = InMemoryRepository::new();
    for (prompt, correct) in [("q1", "4"), ("q2", "5"), ("q3", "6")] {
        repo.insert_question(&question(prompt, correct)).await.unwrap();
    }

    let bank = Arc::new(QuestionBankService::new(Arc::new(repo.clone())));
    let scores = Arc::new(ScoreService::new(
        Clock::fixed(fixed_now()),
        Arc::new(repo.clone()),
    ));
    let quiz = QuizLoopService::new(bank, scores);
    let alice = Username::new("alice").unwrap();

    let mut run = quiz.start_quiz(alice.clone(), Difficulty::Easy).await;
    assert_eq!(run.source, QuestionSource::Bank);
    assert_eq!(run.session.total(), 3);

    // Questions are shuffled, so answer by looking at the current one.
    let mut answered = 0;
    while let Some(current) = run.session.current_question().cloned() {
        let selected = if answered < 2 {
            current.correct_answer().to_string()
        } else {
            "wrong".to_string()
        };
        let result = quiz.answer(&mut run, Some(&selected)).await.unwrap();
        answered += 1;
        if answered < 3 {
            assert_eq!(result.recording, ScoreRecording::Pending);
        }
    }

    assert_eq!(run.session.score(), 2);
    assert!(run.session.is_finished());
    let ScoreRecording::Recorded(entry) = &run.recording else {
        panic!("score should be recorded");
    };
    assert_eq!(entry.score, 2);
    assert_eq!(entry.submitted_at, fixed_now());

    assert_eq!(
        quiz.answer(&mut run, Some("4")).await.unwrap_err(),
        QuizError::Finished
    );
    let stored = repo.list_scores(None).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].username, alice);
}

#[tokio::test]
async fn empty_bank_plays_the_sample_questions() {
    let services = AppServices::in_memory(Clock::fixed(fixed_now()), AdminCredentials::default());
    let quiz = services.quiz_loop();

    let mut run = quiz
        .start_quiz(Username::new("bob").unwrap(), Difficulty::Hard)
        .await;
    assert!(matches!(run.source, QuestionSource::Fallback(_)));
    assert_eq!(run.session.total(), 5);

    while run.session.current_question().is_some() {
        assert_eq!(
            quiz.answer(&mut run, None).await.unwrap_err(),
            QuizError::NoOptionSelected
        );
        let result = quiz.answer(&mut run, Some("not an option")).await.unwrap();
        assert!(!result.outcome.correct);
    }

    assert!(matches!(run.recording, ScoreRecording::Recorded(ref e) if e.score == 0));
    let report = services.scores().report().await.unwrap();
    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.overall_average, Some(0.0));
}
