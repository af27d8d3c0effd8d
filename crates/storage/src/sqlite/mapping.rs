use quiz_core::model::{BankQuestion, Difficulty, Question, QuestionId, ScoreEntry, Username};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

pub(crate) fn question_id_from_i64(v: i64) -> Result<QuestionId, StorageError> {
    u64::try_from(v)
        .map(QuestionId::new)
        .map_err(|_| StorageError::Serialization("question_id sign overflow".into()))
}

pub(crate) fn question_id_to_i64(id: QuestionId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("question_id overflow".into()))
}

pub(crate) fn parse_difficulty(s: &str) -> Result<Difficulty, StorageError> {
    s.parse::<Difficulty>().map_err(ser)
}

pub(crate) fn map_question_row(row: &SqliteRow) -> Result<Question, StorageError> {
    let difficulty: String = row.try_get("difficulty").map_err(ser)?;
    Ok(Question::new(
        row.try_get::<String, _>("question").map_err(ser)?,
        [
            row.try_get::<String, _>("option_a").map_err(ser)?,
            row.try_get::<String, _>("option_b").map_err(ser)?,
            row.try_get::<String, _>("option_c").map_err(ser)?,
            row.try_get::<String, _>("option_d").map_err(ser)?,
        ],
        row.try_get::<String, _>("correct_answer").map_err(ser)?,
        parse_difficulty(&difficulty)?,
    ))
}

pub(crate) fn map_bank_question_row(row: &SqliteRow) -> Result<BankQuestion, StorageError> {
    Ok(BankQuestion {
        id: question_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        question: map_question_row(row)?,
    })
}

pub(crate) fn map_score_row(row: &SqliteRow) -> Result<ScoreEntry, StorageError> {
    let score: i64 = row.try_get("score").map_err(ser)?;
    Ok(ScoreEntry {
        username: Username::new(row.try_get::<String, _>("username").map_err(ser)?).map_err(ser)?,
        score: u32::try_from(score)
            .map_err(|_| StorageError::Serialization(format!("invalid score: {score}")))?,
        submitted_at: row.try_get("submission_time").map_err(ser)?,
        average_score: row.try_get("average_score").map_err(ser)?,
    })
}
